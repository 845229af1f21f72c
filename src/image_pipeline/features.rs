//! Feature extraction module
//!
//! Binarizes or keeps pixel intensities, optionally mean-pools the result and
//! exposes the intensity-weighted centroid of what remains.

mod downscale;
mod extracted;
mod extractor;
mod threshold;
pub mod types;


pub use downscale::downscale;
pub use extracted::ExtractedImage;
pub use extractor::{extract, FeatureExtractor};
pub use threshold::{binarize, otsu_threshold};
pub use types::{Centroid, FeatureConfig, FeatureConfigBuilder, AUTO_THRESHOLD};
