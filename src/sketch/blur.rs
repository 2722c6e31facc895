//! Separable Gaussian smoothing with mirrored borders.
//!
//! Design
//! - One 1D kernel applied in two passes (horizontal into a scratch buffer,
//!   then vertical), O(W·H·extent) total.
//! - The deviation is derived from the extent with the conventional
//!   `0.3·((extent−1)/2 − 1) + 0.8` rule, so a 21-tap kernel gets σ = 3.5.
//! - Borders reflect without repeating the edge sample (`reflect-101`), so
//!   a uniform field stays uniform under the filter.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Conventional deviation for a Gaussian kernel of the given extent.
pub fn sigma_for_extent(extent: usize) -> f32 {
    0.3 * ((extent as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian kernel with `extent` taps.
pub fn gaussian_kernel(extent: usize) -> Vec<f32> {
    let sigma = sigma_for_extent(extent);
    let radius = (extent / 2) as i64;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Mirror a possibly out-of-bounds coordinate back into `[0, len)` without
/// repeating the edge sample: for `len = 4`, `-2 -1 | 0 1 2 3 | 4 5` maps to
/// `2 1 | 0 1 2 3 | 2 1`.
#[inline]
fn reflect101(mut t: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    loop {
        if t < 0 {
            t = -t;
        } else if t >= len {
            t = 2 * len - 2 - t;
        } else {
            return t as usize;
        }
    }
}

/// Blur `src` with a normalized Gaussian of the given extent per axis.
///
/// The extent must be odd and non-zero; callers validate it up front.
pub fn gaussian_blur(src: &ImageF32, extent: usize) -> ImageF32 {
    let kernel = gaussian_kernel(extent);
    let radius = (extent / 2) as i64;
    let (w, h) = (src.w, src.h);

    // horizontal pass
    let mut tmp = ImageF32::new(w, h);
    for (y, row) in src.rows().enumerate() {
        let out_row = tmp.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = reflect101(x as i64 + k as i64 - radius, w as i64);
                acc += weight * row[sx];
            }
            out_row[x] = acc;
        }
    }

    // vertical pass
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for (k, &weight) in kernel.iter().enumerate() {
            let sy = reflect101(y as i64 + k as i64 - radius, h as i64);
            let src_row = tmp.row(sy);
            let out_row = out.row_mut(y);
            for x in 0..w {
                out_row[x] += weight * src_row[x];
            }
        }
    }
    out
}
