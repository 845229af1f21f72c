//! Dataset encoding and framing selectors

use std::fmt;
use std::path::Path;

/// Path suffix that switches on gzip framing.
pub const GZIP_SUFFIX: &str = ".gz";

/// On-disk encoding of a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Compact bincode stream
    Binary,
    /// Self-describing JSON document
    #[default]
    TaggedText,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Binary => f.write_str("binary"),
            Encoding::TaggedText => f.write_str("tagged-text"),
        }
    }
}

/// Stream framing applied around the encoded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    pub fn for_path(path: &Path) -> Self {
        if is_gzip_path(path) {
            Compression::Gzip
        } else {
            Compression::None
        }
    }
}

/// True when the whole path ends in exactly `.gz` (case-sensitive).
pub fn is_gzip_path(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(GZIP_SUFFIX)
}
