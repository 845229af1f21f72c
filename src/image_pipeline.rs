//! Image processing pipeline module
//!
//! This module provides a structured approach to preparing labeled image
//! datasets, with separate modules for raster decoding, feature extraction,
//! the dataset model, its on-disk codecs, image dumps and conversion
//! orchestration.

pub mod common;
pub mod raster;
pub mod features;
pub mod dataset;
pub mod codec;
pub mod dump;
pub mod conversions;

#[cfg(test)]
mod test_support;

pub use common::{
    LidxError,
    Result,
};

pub use raster::{
    Channel,
    MnistReader,
    MnistSource,
    PixelGrid,
    PngReader,
    RasterReader,
};

pub use features::{
    ExtractedImage,
    FeatureConfig,
    FeatureConfigBuilder,
    FeatureExtractor,
};

pub use dataset::{
    LabeledDataset,
    LabeledRecord,
};

pub use codec::{
    DatasetCodec,
    Encoding,
    LidxFile,
};

pub use dump::{
    DumpConfig,
    ImageDumpWriter,
    PgmDumpWriter,
};

pub use conversions::{
    load_png_features,
    mnist_to_dataset,
    synthetic_digits,
    MnistToLidxPipeline,
    Placement,
    PngFeatureLoader,
};
