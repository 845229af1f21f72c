use std::io::{Read, Write};

use tracing::debug;

use crate::image_pipeline::codec::dataset_codec::DatasetCodec;
use crate::image_pipeline::codec::stored::{DatasetView, StoredDataset};
use crate::image_pipeline::codec::types::Encoding;
use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dataset::LabeledDataset;

/// Compact encoding backed by bincode. Every sequence carries a length prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl DatasetCodec for BinaryCodec {
    fn encoding(&self) -> Encoding {
        Encoding::Binary
    }

    fn encode(&self, dataset: &LabeledDataset, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding {} records as binary", dataset.len());
        bincode::serialize_into(output, &DatasetView::new(dataset))
            .map_err(|e| LidxError::OutputWriteError(e.to_string()))
    }

    fn decode(&self, input: &mut dyn Read) -> Result<LabeledDataset> {
        let stored: StoredDataset = bincode::deserialize_from(&mut *input)
            .map_err(|e| LidxError::FormatError(e.to_string()))?;

        let mut trailing = [0u8; 1];
        match input.read(&mut trailing) {
            Ok(0) => {}
            Ok(_) => {
                return Err(LidxError::FormatError(
                    "unexpected bytes after the encoded dataset".to_string(),
                ));
            }
            Err(e) => return Err(LidxError::FormatError(e.to_string())),
        }

        let dataset = stored.into_dataset()?;
        debug!("Decoded {} binary records", dataset.len());
        Ok(dataset)
    }
}
