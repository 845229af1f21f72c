//! Pipeline conversions module
//!
//! Orchestrates decoding, feature extraction and dataset encoding: MNIST pairs
//! to LIDX files, synthetic digit datasets and directories of PNG scans.

mod mnist_to_lidx;
mod png_features;
mod synthetic;

#[cfg(test)]
mod tests;

pub use mnist_to_lidx::{mnist_to_dataset, MnistToLidxPipeline};
pub use png_features::{find_image_files, load_png_features, LoadedImage, PngFeatureLoader};
pub use synthetic::{synthetic_digits, Placement, DIGIT_GLYPHS, GLYPH_COLS, GLYPH_ROWS};
