use tracing::{debug, instrument};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::features::{
    downscale::downscale,
    extracted::ExtractedImage,
    threshold::{binarize, otsu_threshold},
    types::FeatureConfig,
};
use crate::image_pipeline::raster::PixelGrid;

/// Applies one [`FeatureConfig`] to any number of decoded grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    #[instrument(skip(self, grid), fields(width = grid.width, height = grid.height))]
    pub fn extract(&self, grid: &PixelGrid) -> Result<ExtractedImage> {
        extract(grid, &self.config)
    }
}

/// Threshold (or keep) intensities, then mean-pool by the configured factor.
pub fn extract(grid: &PixelGrid, config: &FeatureConfig) -> Result<ExtractedImage> {
    let (pixels, threshold) = if config.weighted {
        (grid.data.clone(), None)
    } else {
        let threshold = if config.is_auto_threshold() {
            otsu_threshold(&grid.data, grid.bits_per_sample)
        } else {
            config.threshold
        };
        (binarize(&grid.data, threshold, grid.max_sample()), Some(threshold))
    };

    let (pixels, width, height) = downscale(
        &pixels,
        grid.width,
        grid.height,
        config.downscale_factor(),
    )?;

    debug!(
        width,
        height,
        threshold = ?threshold,
        "Extracted features"
    );
    Ok(ExtractedImage::new(
        width,
        height,
        pixels,
        *config,
        threshold,
        grid.max_sample(),
    ))
}
