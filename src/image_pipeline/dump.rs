//! Image dump module
//!
//! Writes extracted images to disk as 16-bit PGM for inspection.

mod pgm_writer;
mod writer;
pub mod types;


pub use pgm_writer::PgmDumpWriter;
pub use types::DumpConfig;
pub use writer::ImageDumpWriter;
