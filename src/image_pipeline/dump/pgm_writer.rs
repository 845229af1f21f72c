use std::io::{Cursor, Write};

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use tracing::debug;

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dump::writer::ImageDumpWriter;
use crate::image_pipeline::features::ExtractedImage;

/// Writes extracted images as binary PGM. Sources of 8 bits or less produce
/// an 8-bit map (maxval 255), deeper sources a 16-bit one (maxval 65535).
pub struct PgmDumpWriter;

impl PgmDumpWriter {
    fn to_dynamic(image: &ExtractedImage) -> Result<DynamicImage> {
        let (width, height) = (image.width() as u32, image.height() as u32);
        let invalid = || LidxError::InvalidDimensions(image.width(), image.height());

        if image.max_sample() <= u16::from(u8::MAX) {
            let samples = image
                .pixels()
                .iter()
                .map(|&v| v.min(u16::from(u8::MAX)) as u8)
                .collect();
            let gray: ImageBuffer<Luma<u8>, Vec<u8>> =
                ImageBuffer::from_raw(width, height, samples).ok_or_else(invalid)?;
            Ok(DynamicImage::ImageLuma8(gray))
        } else {
            let gray: ImageBuffer<Luma<u16>, Vec<u16>> =
                ImageBuffer::from_raw(width, height, image.pixels().to_vec()).ok_or_else(invalid)?;
            Ok(DynamicImage::ImageLuma16(gray))
        }
    }
}

impl ImageDumpWriter for PgmDumpWriter {
    fn extension(&self) -> &'static str {
        "pgm"
    }

    fn write_image(&self, image: &ExtractedImage, output: &mut dyn Write) -> Result<()> {
        debug!(
            max_sample = image.max_sample(),
            "Encoding PGM dump: {}x{}",
            image.width(),
            image.height()
        );

        let mut buffer = Vec::new();
        Self::to_dynamic(image)?
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Pnm)
            .map_err(|e| LidxError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;
        Ok(())
    }
}
