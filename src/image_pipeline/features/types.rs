//! Feature extraction configuration types

/// Threshold value that asks the extractor to compute a cutoff itself.
pub const AUTO_THRESHOLD: u16 = 0;

/// Configuration for turning a decoded grid into an [`ExtractedImage`].
///
/// [`ExtractedImage`]: crate::image_pipeline::features::ExtractedImage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Keep raw intensities (true) or binarize against `threshold` (false)
    pub weighted: bool,
    /// Binarization cutoff; pixels at or above it saturate.
    /// [`AUTO_THRESHOLD`] computes the cutoff from the image histogram.
    pub threshold: u16,
    /// Block size for mean-pooling; 0 and 1 leave the resolution unchanged
    pub downscale: u32,
    /// Divide distances to the centroid by the image diagonal
    pub normalize_distance: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            weighted: true,
            threshold: 1000,
            downscale: 1,
            normalize_distance: false,
        }
    }
}

impl FeatureConfig {
    pub fn builder() -> FeatureConfigBuilder {
        FeatureConfigBuilder::default()
    }

    /// Effective pooling block size.
    pub fn downscale_factor(&self) -> usize {
        self.downscale.max(1) as usize
    }

    pub fn is_auto_threshold(&self) -> bool {
        self.threshold == AUTO_THRESHOLD
    }
}

/// Builder for FeatureConfig
#[derive(Default)]
pub struct FeatureConfigBuilder {
    weighted: Option<bool>,
    threshold: Option<u16>,
    downscale: Option<u32>,
    normalize_distance: Option<bool>,
}

impl FeatureConfigBuilder {
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = Some(weighted);
        self
    }

    pub fn threshold(mut self, threshold: u16) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn auto_threshold(mut self) -> Self {
        self.threshold = Some(AUTO_THRESHOLD);
        self
    }

    pub fn downscale(mut self, factor: u32) -> Self {
        self.downscale = Some(factor);
        self
    }

    pub fn normalize_distance(mut self, normalize: bool) -> Self {
        self.normalize_distance = Some(normalize);
        self
    }

    pub fn build(self) -> FeatureConfig {
        let default = FeatureConfig::default();
        FeatureConfig {
            weighted: self.weighted.unwrap_or(default.weighted),
            threshold: self.threshold.unwrap_or(default.threshold),
            downscale: self.downscale.unwrap_or(default.downscale),
            normalize_distance: self.normalize_distance.unwrap_or(default.normalize_distance),
        }
    }
}

/// Intensity-weighted centre of mass, in pixel coordinates (x = column, y = row).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((x - self.x).powi(2) + (y - self.y).powi(2)).sqrt()
    }
}
