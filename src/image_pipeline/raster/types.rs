//! Decoded raster types

use crate::image_pipeline::common::error::{LidxError, Result};

/// Dense, row-major grid of pixel intensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// One intensity per pixel, `width * height` values
    pub data: Vec<u16>,
    /// Bit depth of the source samples (8 for MNIST, 16 for PNG)
    pub bits_per_sample: u32,
}

impl PixelGrid {
    /// Builds a grid, rejecting empty dimensions and buffers of the wrong length.
    pub fn new(width: usize, height: usize, data: Vec<u16>, bits_per_sample: u32) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(LidxError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            data,
            bits_per_sample: bits_per_sample.clamp(1, 16),
        })
    }

    /// Intensity at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Largest value the source bit depth can express.
    pub fn max_sample(&self) -> u16 {
        if self.bits_per_sample >= 16 {
            u16::MAX
        } else {
            (1u16 << self.bits_per_sample) - 1
        }
    }
}

/// Images decoded from an MNIST image file.
#[derive(Debug, Clone)]
pub struct MnistImages {
    pub rows: usize,
    pub cols: usize,
    pub grids: Vec<PixelGrid>,
}

impl MnistImages {
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
