//! Binarization and automatic threshold selection.

use tracing::debug;

/// Maps every pixel below `threshold` to 0 and every other pixel to
/// `max_value`, the largest intensity of the source bit depth.
pub fn binarize(pixels: &[u16], threshold: u16, max_value: u16) -> Vec<u16> {
    pixels
        .iter()
        .map(|&v| if v < threshold { 0 } else { max_value })
        .collect()
}

/// Picks a binarization cutoff with Otsu's method.
///
/// The histogram has `2^bits_per_sample` bins. The split `k` maximizing the
/// between-class variance puts values `<= k` in the dark class, so the
/// returned cutoff is `k + 1`. A flat histogram has no split; its single value
/// is returned (at least 1), which saturates a flat non-zero image and keeps a
/// flat zero image dark.
pub fn otsu_threshold(pixels: &[u16], bits_per_sample: u32) -> u16 {
    let bins = 1usize << bits_per_sample.clamp(1, 16);
    let mut histogram = vec![0u64; bins];
    for &v in pixels {
        histogram[(v as usize).min(bins - 1)] += 1;
    }

    let total = pixels.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut weight_dark = 0.0;
    let mut sum_dark = 0.0;
    let mut best_variance = 0.0;
    let mut best_split = None;

    for (k, &count) in histogram.iter().enumerate() {
        weight_dark += count as f64;
        if weight_dark == 0.0 {
            continue;
        }
        let weight_light = total - weight_dark;
        if weight_light == 0.0 {
            break;
        }
        sum_dark += k as f64 * count as f64;

        let mean_dark = sum_dark / weight_dark;
        let mean_light = (sum_all - sum_dark) / weight_light;
        let variance = weight_dark * weight_light * (mean_dark - mean_light).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_split = Some(k);
        }
    }

    let threshold = match best_split {
        Some(k) => (k + 1) as u16,
        None => pixels.first().copied().unwrap_or(0).max(1),
    };
    debug!(threshold, bins, "Resolved automatic threshold");
    threshold
}
