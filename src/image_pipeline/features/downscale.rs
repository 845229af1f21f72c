use crate::image_pipeline::common::error::{LidxError, Result};

/// Mean-pools `pixels` over non-overlapping `factor x factor` blocks.
///
/// Partial blocks along the right and bottom edges are dropped, so the output
/// is `floor(width / factor) x floor(height / factor)`. Block means are
/// truncated.
pub fn downscale(
    pixels: &[u16],
    width: usize,
    height: usize,
    factor: usize,
) -> Result<(Vec<u16>, usize, usize)> {
    if factor <= 1 {
        return Ok((pixels.to_vec(), width, height));
    }

    let new_width = width / factor;
    let new_height = height / factor;
    if new_width == 0 || new_height == 0 {
        return Err(LidxError::InvalidDimensions(new_width, new_height));
    }

    let area = (factor * factor) as u64;
    let mut out = Vec::with_capacity(new_width * new_height);
    for by in 0..new_height {
        for bx in 0..new_width {
            let mut sum = 0u64;
            for y in by * factor..(by + 1) * factor {
                let start = y * width + bx * factor;
                sum += pixels[start..start + factor]
                    .iter()
                    .map(|&v| u64::from(v))
                    .sum::<u64>();
            }
            out.push((sum / area) as u16);
        }
    }

    Ok((out, new_width, new_height))
}
