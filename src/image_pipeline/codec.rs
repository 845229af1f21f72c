//! LIDX dataset codec module
//!
//! Two encodings of the same schema (binary and tagged text), each behind the
//! [`DatasetCodec`] trait, plus transparent gzip framing for `.gz` paths.

mod binary_codec;
mod dataset_codec;
mod lidx_file;
mod stored;
mod text_codec;
pub mod types;


pub use binary_codec::BinaryCodec;
pub use dataset_codec::DatasetCodec;
pub use lidx_file::{read, read_with, write, write_with, LidxFile};
pub use text_codec::TaggedTextCodec;
pub use types::{is_gzip_path, Compression, Encoding, GZIP_SUFFIX};
