//! Labeled dataset model

mod labeled;
mod record;

#[cfg(test)]
mod tests;

pub use labeled::LabeledDataset;
pub use record::LabeledRecord;
