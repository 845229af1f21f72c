use std::io::{Read, Write};

use crate::image_pipeline::codec::types::Encoding;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::dataset::LabeledDataset;

pub trait DatasetCodec {
    fn encoding(&self) -> Encoding;

    fn encode(&self, dataset: &LabeledDataset, output: &mut dyn Write) -> Result<()>;

    fn decode(&self, input: &mut dyn Read) -> Result<LabeledDataset>;
}

impl<C: DatasetCodec + ?Sized> DatasetCodec for Box<C> {
    fn encoding(&self) -> Encoding {
        (**self).encoding()
    }

    fn encode(&self, dataset: &LabeledDataset, output: &mut dyn Write) -> Result<()> {
        (**self).encode(dataset, output)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<LabeledDataset> {
        (**self).decode(input)
    }
}
