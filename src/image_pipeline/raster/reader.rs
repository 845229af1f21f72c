use std::path::Path;

use crate::image_pipeline::common::{self, error::{LidxError, Result}};
use crate::image_pipeline::raster::types::{MnistImages, PixelGrid};

pub trait RasterReader {
    fn decode(&self, data: &[u8]) -> Result<PixelGrid>;

    fn decode_file(&self, path: &Path) -> Result<PixelGrid> {
        let bytes = common::read_input(path)?;
        self.decode(&bytes)
    }
}

pub trait MnistSource {
    fn decode_labels(&self, data: &[u8]) -> Result<Vec<u8>>;

    fn decode_images(&self, data: &[u8]) -> Result<MnistImages>;

    fn decode_labels_file(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = common::read_input(path)?;
        self.decode_labels(&bytes)
    }

    fn decode_images_file(&self, path: &Path) -> Result<MnistImages> {
        let bytes = common::read_input(path)?;
        self.decode_images(&bytes)
    }

    /// Decodes a label file and its image file, requiring equal record counts.
    fn decode_pair(&self, label_path: &Path, image_path: &Path) -> Result<(Vec<u8>, MnistImages)> {
        let labels = self.decode_labels_file(label_path)?;
        let images = self.decode_images_file(image_path)?;
        if labels.len() != images.len() {
            return Err(LidxError::FormatError(format!(
                "{} holds {} labels but {} holds {} images",
                label_path.display(),
                labels.len(),
                image_path.display(),
                images.len()
            )));
        }
        Ok((labels, images))
    }
}
