use std::cell::OnceCell;
use std::ops::Index;

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::features::types::{Centroid, FeatureConfig};

/// Pixel buffer produced by the extractor, with a lazily computed centroid.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
    config: FeatureConfig,
    threshold: Option<u16>,
    max_sample: u16,
    centroid: OnceCell<Centroid>,
}

impl ExtractedImage {
    pub(crate) fn new(
        width: usize,
        height: usize,
        pixels: Vec<u16>,
        config: FeatureConfig,
        threshold: Option<u16>,
        max_sample: u16,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
            config,
            threshold,
            max_sample,
            centroid: OnceCell::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Cutoff actually applied, after resolving an automatic threshold.
    /// `None` for weighted images.
    pub fn threshold(&self) -> Option<u16> {
        self.threshold
    }

    /// Largest intensity of the source bit depth; binarized pixels saturate
    /// to this value.
    pub fn max_sample(&self) -> u16 {
        self.max_sample
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Length of the image diagonal.
    pub fn diagonal(&self) -> f64 {
        ((self.width * self.width + self.height * self.height) as f64).sqrt()
    }

    /// Intensity-weighted centre of mass, computed on first use.
    ///
    /// Fails with [`LidxError::EmptyImage`] when every pixel is zero.
    pub fn centroid(&self) -> Result<Centroid> {
        if let Some(centroid) = self.centroid.get() {
            return Ok(*centroid);
        }
        let centroid = self.compute_centroid()?;
        Ok(*self.centroid.get_or_init(|| centroid))
    }

    #[cfg(test)]
    pub(super) fn is_centroid_cached(&self) -> bool {
        self.centroid.get().is_some()
    }

    fn compute_centroid(&self) -> Result<Centroid> {
        let mut mass = 0.0;
        let mut moment_x = 0.0;
        let mut moment_y = 0.0;
        for (row, line) in self.pixels.chunks_exact(self.width).enumerate() {
            for (col, &v) in line.iter().enumerate() {
                if v == 0 {
                    continue;
                }
                let v = f64::from(v);
                mass += v;
                moment_x += col as f64 * v;
                moment_y += row as f64 * v;
            }
        }
        if mass == 0.0 {
            return Err(LidxError::EmptyImage);
        }
        Ok(Centroid {
            x: moment_x / mass,
            y: moment_y / mass,
        })
    }

    /// Euclidean distance from `(x, y)` to the centroid, divided by the
    /// diagonal when the config asks for normalized distances.
    pub fn distance_to_centroid(&self, x: f64, y: f64) -> Result<f64> {
        let d = self.centroid()?.distance_to(x, y);
        if self.config.normalize_distance {
            Ok(d / self.diagonal())
        } else {
            Ok(d)
        }
    }

    /// Flattens the buffer into LIDX record data.
    pub fn to_record_data(&self) -> Vec<i32> {
        self.pixels.iter().map(|&v| i32::from(v)).collect()
    }
}

impl Index<usize> for ExtractedImage {
    type Output = u16;

    fn index(&self, index: usize) -> &u16 {
        &self.pixels[index]
    }
}
