use std::io::{Read, Write};

use tracing::debug;

use crate::image_pipeline::codec::dataset_codec::DatasetCodec;
use crate::image_pipeline::codec::stored::{DatasetView, StoredDataset};
use crate::image_pipeline::codec::types::Encoding;
use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dataset::LabeledDataset;

/// Human-readable encoding: a pretty-printed JSON document whose fields name
/// every part of the schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedTextCodec;

impl DatasetCodec for TaggedTextCodec {
    fn encoding(&self) -> Encoding {
        Encoding::TaggedText
    }

    fn encode(&self, dataset: &LabeledDataset, output: &mut dyn Write) -> Result<()> {
        debug!("Encoding {} records as tagged text", dataset.len());
        serde_json::to_writer_pretty(&mut *output, &DatasetView::new(dataset))
            .map_err(|e| LidxError::OutputWriteError(e.to_string()))?;
        output.write_all(b"\n")?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<LabeledDataset> {
        let stored: StoredDataset =
            serde_json::from_reader(input).map_err(|e| LidxError::FormatError(e.to_string()))?;
        let dataset = stored.into_dataset()?;
        debug!("Decoded {} tagged-text records", dataset.len());
        Ok(dataset)
    }
}
