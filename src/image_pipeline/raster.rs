//! Raster decoding module
//!
//! Turns PNG files and MNIST label/image pairs into dense intensity grids.

mod reader;
mod png_reader;
mod mnist_reader;
pub mod types;


pub use reader::{MnistSource, RasterReader};
pub use png_reader::{Channel, PngReader};
pub use mnist_reader::{MnistReader, IMAGE_MAGIC, LABEL_MAGIC};
pub use types::{MnistImages, PixelGrid};
