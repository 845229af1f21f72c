//! PNG reader built on the `image` crate.
//!
//! Every PNG colour type is widened to 16-bit samples and reduced to one
//! scalar per pixel at full native resolution. By default the scalar is the
//! luminance; a single colour channel can be selected instead.

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::PixelGrid;

/// PNG samples are always widened to this depth.
const PNG_BITS_PER_SAMPLE: u32 = 16;

/// Which scalar a multi-channel pixel is reduced to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Channel {
    /// Rec. 709 luminance as computed by `image`
    #[default]
    Luminance,
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    fn rgba_index(self) -> Option<usize> {
        match self {
            Channel::Luminance => None,
            Channel::Red => Some(0),
            Channel::Green => Some(1),
            Channel::Blue => Some(2),
            Channel::Alpha => Some(3),
        }
    }
}

/// PNG decoder producing a [`PixelGrid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader {
    channel: Channel,
}

impl PngReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(channel: Channel) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    fn reduce(&self, decoded: DynamicImage) -> Vec<u16> {
        match self.channel.rgba_index() {
            None => decoded.into_luma16().into_raw(),
            Some(idx) => decoded
                .into_rgba16()
                .into_raw()
                .chunks_exact(4)
                .map(|px| px[idx])
                .collect(),
        }
    }
}

impl RasterReader for PngReader {
    fn decode(&self, data: &[u8]) -> Result<PixelGrid> {
        debug!("Decoding PNG image, {} bytes", data.len());

        let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)
            .map_err(|e| LidxError::DecodeError(e.to_string()))?;

        let width = decoded.width() as usize;
        let height = decoded.height() as usize;
        if width == 0 || height == 0 {
            return Err(LidxError::InvalidDimensions(width, height));
        }

        debug!(color = ?decoded.color(), "Decoded PNG: {}x{}", width, height);

        let samples = self.reduce(decoded);
        PixelGrid::new(width, height, samples, PNG_BITS_PER_SAMPLE)
    }
}
