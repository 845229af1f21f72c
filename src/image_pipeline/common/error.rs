use thiserror::Error;

#[derive(Error, Debug)]
pub enum LidxError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Malformed dataset or MNIST stream: {0}")]
    FormatError(String),

    #[error("Record length {actual} does not match declared dimensions (expected {expected})")]
    ShapeError { expected: usize, actual: usize },

    #[error("Label {0} is negative; labels index a class set")]
    InvalidLabel(i32),

    #[error("Index {index} out of range for length {len}")]
    IndexError { index: usize, len: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Centroid undefined: image has zero total intensity")]
    EmptyImage,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LidxError>;
