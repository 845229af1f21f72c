//! Image dump configuration types

/// Configuration for dumping extracted images
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// Create the target directory when it does not exist
    pub create_dirs: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self { create_dirs: true }
    }
}
