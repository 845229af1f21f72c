//! Synthetic digit datasets.
//!
//! Each of the ten digits is a fixed 3x5 glyph of ones stamped onto a zeroed
//! canvas. Glyph placement is drawn from a seeded RNG, optionally pinned to the
//! vertical and/or horizontal centre of the canvas.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use crate::image_pipeline::common::error::{LidxError, Result};
use crate::image_pipeline::dataset::LabeledDataset;

pub const GLYPH_ROWS: usize = 5;
pub const GLYPH_COLS: usize = 3;

/// Row-major 3x5 glyphs for digits 0-9.
#[rustfmt::skip]
pub const DIGIT_GLYPHS: [[i32; GLYPH_ROWS * GLYPH_COLS]; 10] = [
    [1, 1, 1,
     1, 0, 1,
     1, 0, 1,
     1, 0, 1,
     1, 1, 1],
    [0, 0, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1],
    [1, 1, 1,
     0, 0, 1,
     0, 1, 0,
     1, 0, 0,
     1, 1, 1],
    [1, 1, 1,
     0, 0, 1,
     1, 1, 1,
     0, 0, 1,
     1, 1, 1],
    [1, 0, 1,
     1, 0, 1,
     1, 1, 1,
     0, 0, 1,
     0, 0, 1],
    [1, 1, 1,
     1, 0, 0,
     1, 1, 1,
     0, 0, 1,
     1, 1, 1],
    [1, 0, 0,
     1, 0, 0,
     1, 1, 1,
     1, 0, 1,
     1, 1, 1],
    [1, 1, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1],
    [1, 1, 1,
     1, 0, 1,
     1, 1, 1,
     1, 0, 1,
     1, 1, 1],
    [1, 1, 1,
     1, 0, 1,
     1, 1, 1,
     0, 0, 1,
     0, 0, 1],
];

/// Where glyphs land on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// Row and column both random
    #[default]
    Random,
    /// Row pinned to the centre, column random
    FixedRow,
    /// Column pinned to the centre, row random
    FixedCol,
    /// Glyph centred on the canvas
    FixedBoth,
}

/// Generates `10 * count` records: `count` rounds of the digits 0 through 9,
/// in that order, each on a `dims[0] x dims[1]` canvas.
#[instrument]
pub fn synthetic_digits(count: usize, dims: &[u16], placement: Placement, seed: u64) -> Result<LabeledDataset> {
    let &[rows, cols] = dims else {
        return Err(LidxError::InvalidConfig(format!(
            "synthetic digits need [rows, cols], got {dims:?}"
        )));
    };
    let (rows, cols) = (usize::from(rows), usize::from(cols));
    if rows < GLYPH_ROWS || cols < GLYPH_COLS {
        return Err(LidxError::InvalidConfig(format!(
            "canvas {rows}x{cols} is smaller than a {GLYPH_ROWS}x{GLYPH_COLS} glyph"
        )));
    }

    let free_rows = rows - GLYPH_ROWS;
    let free_cols = cols - GLYPH_COLS;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut dataset = LabeledDataset::with_capacity(dims.to_vec(), count * DIGIT_GLYPHS.len());

    for _ in 0..count {
        for (digit, glyph) in DIGIT_GLYPHS.iter().enumerate() {
            let mut top = rng.gen_range(0..free_rows.max(1));
            let mut left = rng.gen_range(0..free_cols.max(1));
            match placement {
                Placement::Random => {}
                Placement::FixedRow => top = free_rows / 2,
                Placement::FixedCol => left = free_cols / 2,
                Placement::FixedBoth => {
                    top = free_rows / 2;
                    left = free_cols / 2;
                }
            }

            let mut canvas = vec![0i32; rows * cols];
            for (y, glyph_row) in glyph.chunks_exact(GLYPH_COLS).enumerate() {
                let start = (top + y) * cols + left;
                canvas[start..start + GLYPH_COLS].copy_from_slice(glyph_row);
            }
            dataset.push(digit as i32, canvas)?;
        }
    }

    info!(records = dataset.len(), "Synthetic digits generated");
    Ok(dataset)
}
