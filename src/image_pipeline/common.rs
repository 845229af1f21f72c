//! Common utilities module
//!
//! Shared error type and file helpers used across the pipeline.

pub mod error;

use std::path::Path;

pub use error::{LidxError, Result};

/// Reads a whole file into memory, attaching the path to any failure.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| LidxError::InputReadError(format!("{}: {}", path.display(), e)))
}

/// Creates (or truncates) an output file, attaching the path to any failure.
pub fn create_output(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path)
        .map_err(|e| LidxError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
