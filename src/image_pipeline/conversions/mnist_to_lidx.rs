use tracing::{info, instrument};
use std::path::Path;

use crate::image_pipeline::{
    codec::{self, DatasetCodec, Encoding},
    common::error::{LidxError, Result},
    dataset::LabeledDataset,
    features::{extract, FeatureConfig},
    raster::{MnistImages, MnistReader, MnistSource},
};

/// Builds a dataset with one record per MNIST image.
///
/// Without a feature config the raw pixels are flattened and
/// `dims = [rows, cols]`. With one, every image is extracted first and the
/// dims follow the extracted size.
fn assemble_dataset(
    labels: &[u8],
    images: &MnistImages,
    features: Option<&FeatureConfig>,
) -> Result<LabeledDataset> {
    let Some(config) = features else {
        let dims = vec![dim_u16(images.rows)?, dim_u16(images.cols)?];
        let mut dataset = LabeledDataset::with_capacity(dims, images.len());
        for (&label, grid) in labels.iter().zip(&images.grids) {
            let data = grid.data.iter().map(|&v| i32::from(v)).collect();
            dataset.push(i32::from(label), data)?;
        }
        return Ok(dataset);
    };

    let extracted = images
        .grids
        .iter()
        .map(|grid| extract(grid, config))
        .collect::<Result<Vec<_>>>()?;
    let (rows, cols) = extracted
        .first()
        .map(|img| (img.height(), img.width()))
        .unwrap_or((images.rows, images.cols));

    let mut dataset = LabeledDataset::with_capacity(vec![dim_u16(rows)?, dim_u16(cols)?], images.len());
    for (&label, image) in labels.iter().zip(&extracted) {
        dataset.push(i32::from(label), image.to_record_data())?;
    }
    Ok(dataset)
}

fn dim_u16(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| LidxError::FormatError(format!("dimension {n} exceeds u16")))
}

/// Decodes an MNIST label/image pair into a dataset of raw pixels.
pub fn mnist_to_dataset<P: AsRef<Path>, Q: AsRef<Path>>(label_path: P, image_path: Q) -> Result<LabeledDataset> {
    let (labels, images) = MnistReader.decode_pair(label_path.as_ref(), image_path.as_ref())?;
    assemble_dataset(&labels, &images, None)
}

pub struct MnistToLidxPipeline<S: MnistSource, C: DatasetCodec> {
    source: S,
    codec: C,
    features: Option<FeatureConfig>,
}

impl MnistToLidxPipeline<MnistReader, Box<dyn DatasetCodec>> {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            source: MnistReader,
            codec: encoding.codec(),
            features: None,
        }
    }
}

impl<S: MnistSource, C: DatasetCodec> MnistToLidxPipeline<S, C> {
    pub fn with_custom(source: S, codec: C, features: Option<FeatureConfig>) -> Self {
        Self {
            source,
            codec,
            features,
        }
    }

    /// Passes every image through the feature extractor before flattening.
    pub fn with_features(mut self, config: FeatureConfig) -> Self {
        self.features = Some(config);
        self
    }

    #[instrument(skip(self, label_path, image_path), fields(labels = %label_path.display(), images = %image_path.display()))]
    pub fn build_dataset(&self, label_path: &Path, image_path: &Path) -> Result<LabeledDataset> {
        let (labels, images) = {
            let _span = tracing::info_span!("decode_mnist").entered();
            self.source.decode_pair(label_path, image_path)?
        };

        let dataset = {
            let _span = tracing::info_span!("assemble_records",
                records = labels.len(),
                extract = self.features.is_some()
            ).entered();
            assemble_dataset(&labels, &images, self.features.as_ref())?
        };

        info!(
            records = dataset.len(),
            dims = ?dataset.dims(),
            classes = dataset.label_set().len(),
            "MNIST dataset assembled"
        );
        Ok(dataset)
    }

    /// Converts a label/image pair and writes the dataset to `output_path`.
    /// Returns the number of records written.
    #[instrument(skip(self, label_path, image_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        label_path: P,
        image_path: Q,
        output_path: O,
    ) -> Result<usize> {
        let output_path = output_path.as_ref();

        info!(
            output = %output_path.display(),
            encoding = %self.codec.encoding(),
            "Converting MNIST pair"
        );

        let dataset = self.build_dataset(label_path.as_ref(), image_path.as_ref())?;

        {
            let _span = tracing::info_span!("write_lidx").entered();
            codec::write_with(&self.codec, output_path, &dataset)?;
        }

        Ok(dataset.len())
    }

    pub fn features(&self) -> Option<&FeatureConfig> {
        self.features.as_ref()
    }

    pub fn encoding(&self) -> Encoding {
        self.codec.encoding()
    }
}
