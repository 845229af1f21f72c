//! Reading and writing LIDX files.
//!
//! The encoding is chosen by the caller; gzip framing is chosen by the path
//! (see [`is_gzip_path`]). File handles and gzip streams live only for the
//! duration of one call.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::{info, instrument};

use crate::image_pipeline::codec::binary_codec::BinaryCodec;
use crate::image_pipeline::codec::dataset_codec::DatasetCodec;
use crate::image_pipeline::codec::text_codec::TaggedTextCodec;
use crate::image_pipeline::codec::types::{is_gzip_path, Compression, Encoding};
use crate::image_pipeline::common::{self, error::{LidxError, Result}};
use crate::image_pipeline::dataset::LabeledDataset;

impl Encoding {
    pub fn codec(self) -> Box<dyn DatasetCodec> {
        match self {
            Encoding::Binary => Box::new(BinaryCodec),
            Encoding::TaggedText => Box::new(TaggedTextCodec),
        }
    }
}

/// Writes `dataset` to `path` through `codec`, gzip-framed for `.gz` paths.
#[instrument(skip(codec, dataset), fields(path = %path.display(), encoding = %codec.encoding(), records = dataset.len()))]
pub fn write_with(codec: &dyn DatasetCodec, path: &Path, dataset: &LabeledDataset) -> Result<()> {
    let compression = Compression::for_path(path);
    let mut writer = BufWriter::new(common::create_output(path)?);
    let flush_error =
        |e: std::io::Error| LidxError::OutputWriteError(format!("{}: {}", path.display(), e));

    match compression {
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(writer, flate2::Compression::default());
            codec.encode(dataset, &mut encoder)?;
            encoder.finish().and_then(|mut inner| inner.flush()).map_err(flush_error)?;
        }
        Compression::None => {
            codec.encode(dataset, &mut writer)?;
            writer.flush().map_err(flush_error)?;
        }
    }

    info!(compression = ?compression, "Dataset written");
    Ok(())
}

/// Reads a dataset from `path` through `codec`, gunzipping `.gz` paths.
#[instrument(skip(codec), fields(path = %path.display(), encoding = %codec.encoding()))]
pub fn read_with(codec: &dyn DatasetCodec, path: &Path) -> Result<LabeledDataset> {
    let file = File::open(path)
        .map_err(|e| LidxError::InputReadError(format!("{}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);

    let dataset = if is_gzip_path(path) {
        codec.decode(&mut GzDecoder::new(reader))?
    } else {
        codec.decode(&mut reader)?
    };

    info!(records = dataset.len(), dims = ?dataset.dims(), "Dataset read");
    Ok(dataset)
}

pub fn write<P: AsRef<Path>>(path: P, dataset: &LabeledDataset, encoding: Encoding) -> Result<()> {
    write_with(encoding.codec().as_ref(), path.as_ref(), dataset)
}

pub fn read<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<LabeledDataset> {
    read_with(encoding.codec().as_ref(), path.as_ref())
}

/// An encoding choice applied to every path passed to `write` and `read`.
/// Gzip framing is still decided per path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LidxFile {
    encoding: Encoding,
}

impl LidxFile {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn binary() -> Self {
        Self::new(Encoding::Binary)
    }

    pub fn tagged_text() -> Self {
        Self::new(Encoding::TaggedText)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, dataset: &LabeledDataset) -> Result<()> {
        write(path, dataset, self.encoding)
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<LabeledDataset> {
        read(path, self.encoding)
    }
}
