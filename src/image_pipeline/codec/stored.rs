//! Wire schema shared by both encodings.
//!
//! `dims: seq<u16>` followed by `records: seq<{label: i32, data: seq<i32>}>`.

use serde::{Deserialize, Serialize};

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dataset::{LabeledDataset, LabeledRecord};

#[derive(Serialize)]
pub(super) struct DatasetView<'a> {
    dims: &'a [u16],
    records: &'a [LabeledRecord],
}

impl<'a> DatasetView<'a> {
    pub(super) fn new(dataset: &'a LabeledDataset) -> Self {
        Self {
            dims: dataset.dims(),
            records: dataset.records(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredRecord {
    label: i32,
    data: Vec<i32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct StoredDataset {
    dims: Vec<u16>,
    records: Vec<StoredRecord>,
}

impl StoredDataset {
    /// Rebuilds a dataset, rejecting dims whose product overflows, negative
    /// labels and records that disagree with the dims.
    pub(super) fn into_dataset(self) -> Result<LabeledDataset> {
        let mut dataset = LabeledDataset::with_capacity(self.dims, self.records.len());
        dataset
            .record_len()
            .map_err(|e| LidxError::FormatError(e.to_string()))?;
        for (i, record) in self.records.into_iter().enumerate() {
            dataset.push(record.label, record.data).map_err(|e| match e {
                LidxError::ShapeError { expected, actual } => LidxError::FormatError(format!(
                    "record {i} holds {actual} values, dims require {expected}"
                )),
                LidxError::InvalidLabel(label) => {
                    LidxError::FormatError(format!("record {i} has negative label {label}"))
                }
                other => other,
            })?;
        }
        Ok(dataset)
    }
}
