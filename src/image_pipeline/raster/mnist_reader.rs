//! MNIST (IDX) label and image decoding.
//!
//! Both files open with a big-endian magic number and a big-endian record
//! count. The label file then holds one byte per record; the image file holds
//! big-endian `rows` and `cols` followed by `count * rows * cols` pixel bytes.

use tracing::debug;

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::raster::reader::MnistSource;
use crate::image_pipeline::raster::types::{MnistImages, PixelGrid};

/// Magic number of an MNIST label file.
pub const LABEL_MAGIC: u32 = 2049;

/// Magic number of an MNIST image file.
pub const IMAGE_MAGIC: u32 = 2051;

/// MNIST pixels are single bytes.
const MNIST_BITS_PER_SAMPLE: u32 = 8;

/// Decoder for the canonical MNIST label/image pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct MnistReader;

/// Forward-only view over an IDX byte stream.
struct IdxCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> IdxCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                LidxError::FormatError(format!(
                    "stream ended while reading {field}: need {len} bytes at offset {}, have {}",
                    self.pos,
                    self.data.len().saturating_sub(self.pos)
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32_be(&mut self, field: &str) -> Result<u32> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

/// Reads and checks the magic number and record count shared by both files.
fn read_header(cursor: &mut IdxCursor<'_>, expected_magic: u32) -> Result<usize> {
    let magic = cursor.read_u32_be("magic number")?;
    if magic != expected_magic {
        return Err(LidxError::FormatError(format!(
            "bad magic number {magic}, expected {expected_magic}"
        )));
    }
    let count = cursor.read_u32_be("record count")?;
    if count == 0 {
        return Err(LidxError::FormatError("record count is zero".to_string()));
    }
    Ok(count as usize)
}

impl MnistSource for MnistReader {
    fn decode_labels(&self, data: &[u8]) -> Result<Vec<u8>> {
        debug!("Decoding MNIST labels, {} bytes", data.len());

        let mut cursor = IdxCursor::new(data);
        let count = read_header(&mut cursor, LABEL_MAGIC)?;
        let labels = cursor.take(count, "labels")?.to_vec();

        if cursor.remaining() > 0 {
            debug!("Ignoring {} trailing bytes after labels", cursor.remaining());
        }
        debug!("Decoded {} labels", labels.len());
        Ok(labels)
    }

    fn decode_images(&self, data: &[u8]) -> Result<MnistImages> {
        debug!("Decoding MNIST images, {} bytes", data.len());

        let mut cursor = IdxCursor::new(data);
        let count = read_header(&mut cursor, IMAGE_MAGIC)?;
        let rows = cursor.read_u32_be("row count")? as usize;
        let cols = cursor.read_u32_be("column count")? as usize;
        if rows == 0 || cols == 0 {
            return Err(LidxError::FormatError(format!(
                "image dimensions must be positive, got {rows}x{cols}"
            )));
        }

        let pixels_per_image = rows
            .checked_mul(cols)
            .ok_or_else(|| LidxError::FormatError(format!("image size {rows}x{cols} overflows")))?;
        let total = pixels_per_image
            .checked_mul(count)
            .ok_or_else(|| LidxError::FormatError(format!("{count} images of {rows}x{cols} overflow")))?;
        let payload = cursor.take(total, "pixels")?;

        let grids = payload
            .chunks_exact(pixels_per_image)
            .map(|img| {
                let samples = img.iter().map(|&p| u16::from(p)).collect();
                PixelGrid::new(cols, rows, samples, MNIST_BITS_PER_SAMPLE)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Decoded {} images of {}x{}", grids.len(), rows, cols);
        Ok(MnistImages { rows, cols, grids })
    }
}
