use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dataset::record::LabeledRecord;

/// Ordered records sharing one declared shape.
///
/// Every record holds exactly `Π dims` values. The dimension vector is fixed
/// at construction; records can be appended or reordered but never resized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledDataset {
    dims: Vec<u16>,
    records: Vec<LabeledRecord>,
}

impl LabeledDataset {
    pub fn new(dims: Vec<u16>) -> Self {
        Self {
            dims,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(dims: Vec<u16>, capacity: usize) -> Self {
        Self {
            dims,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn dims(&self) -> &[u16] {
        &self.dims
    }

    /// Size of the n-th declared dimension.
    pub fn dim(&self, n: usize) -> Result<usize> {
        self.dims
            .get(n)
            .map(|&d| usize::from(d))
            .ok_or(LidxError::IndexError {
                index: n,
                len: self.dims.len(),
            })
    }

    /// Number of values every record must hold. Fails when the product of
    /// the dims does not fit in `usize`.
    pub fn record_len(&self) -> Result<usize> {
        self.dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(usize::from(d)))
            .ok_or_else(|| LidxError::InvalidConfig(format!("dims {:?} overflow the record length", self.dims)))
    }

    /// Appends a record, rejecting negative labels and data whose length does
    /// not match the dims.
    pub fn push(&mut self, label: i32, data: Vec<i32>) -> Result<()> {
        if label < 0 {
            return Err(LidxError::InvalidLabel(label));
        }
        let expected = self.record_len()?;
        if data.len() != expected {
            return Err(LidxError::ShapeError {
                expected,
                actual: data.len(),
            });
        }
        self.records.push(LabeledRecord::new(label, data));
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&LabeledRecord> {
        self.records.get(index).ok_or(LidxError::IndexError {
            index,
            len: self.records.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledRecord> {
        self.records.iter()
    }

    /// Reorders records in place. Count and per-record lengths are unchanged.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.records.shuffle(rng);
    }

    /// Distinct labels present in the dataset.
    pub fn label_set(&self) -> BTreeSet<i32> {
        self.records.iter().map(LabeledRecord::label).collect()
    }
}

impl<'a> IntoIterator for &'a LabeledDataset {
    type Item = &'a LabeledRecord;
    type IntoIter = std::slice::Iter<'a, LabeledRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
