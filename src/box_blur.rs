//! Gaussian blur approximated by three successive box blurs.
//!
//! Three box passes build a piecewise quadratic kernel that stays within
//! roughly 3% of a true Gaussian. The box diameter comes from the SVG
//! `feGaussianBlur` formula:
//!
//! ```text
//! d = floor(s * 3 * sqrt(2 * pi) / 4 + 0.5)
//! ```
//!
//! and is forced odd so every box is centered on its output pixel.

use std::f64::consts::PI;

use crate::pixel::PixelBuffer;

/// Radii at or below this are treated as "no blur".
pub const MIN_RADIUS: f64 = f32::EPSILON as f64;

pub fn kernel_diameter(radius: f64) -> u32 {
    let d = (radius * 3.0 * (2.0 * PI).sqrt() / 4.0 + 0.5).floor().max(0.0) as u32;
    if d % 2 != 1 {
        d + 1
    } else {
        d
    }
}

/// Blurs `input` with three box passes, ping-ponging between the two
/// buffers. The result lands in `output`; `input` is left holding the
/// second pass. Returns `false` without touching either buffer when
/// `radius` is too small to matter.
pub fn blur(input: &mut PixelBuffer, output: &mut PixelBuffer, radius: f64) -> bool {
    if radius <= MIN_RADIUS {
        return false;
    }
    let diameter = kernel_diameter(radius);
    box_convolve(input, output, diameter);
    box_convolve(output, input, diameter);
    box_convolve(input, output, diameter);
    true
}

/// One `diameter x diameter` box average from `src` into `dst`.
///
/// Pixels outside the buffer take the value of the nearest edge pixel.
/// Sums are accumulated separably and divided once, so a constant buffer
/// comes back unchanged.
pub fn box_convolve(src: &PixelBuffer, dst: &mut PixelBuffer, diameter: u32) {
    assert_eq!(src.size(), dst.size(), "box convolve needs same-sized buffers");
    let width = src.width() as usize;
    let height = src.height() as usize;
    if width == 0 || height == 0 {
        return;
    }
    let half = (diameter / 2) as isize;
    let area = diameter as u64 * diameter as u64;

    // Horizontal sums, one u64 per channel; `d * d * 255` outgrows u32.
    let mut rows = vec![0u64; width * height * 4];
    for y in 0..height {
        let row = src.row(y as u32);
        let sums = &mut rows[y * width * 4..(y + 1) * width * 4];
        running_sums(width, half, |i, c| row[i * 4 + c] as u64, sums);
    }

    // Vertical sums over the horizontal ones, column by column.
    let mut column = vec![0u64; height * 4];
    for x in 0..width {
        running_sums(height, half, |i, c| rows[(i * width + x) * 4 + c], &mut column);
        for y in 0..height {
            let out = dst.row_mut(y as u32);
            for c in 0..4 {
                out[x * 4 + c] = ((column[y * 4 + c] + area / 2) / area) as u8;
            }
        }
    }
}

/// Sliding-window sums of `len` samples with a window of `2 * half + 1`,
/// clamping sample indices to the valid range.
fn running_sums(
    len: usize,
    half: isize,
    sample: impl Fn(usize, usize) -> u64,
    out: &mut [u64],
) {
    let last = len as isize - 1;
    let clamp = |i: isize| i.clamp(0, last) as usize;
    for c in 0..4 {
        let mut sum: u64 = (-half..=half).map(|k| sample(clamp(k), c)).sum();
        out[c] = sum;
        for i in 1..len as isize {
            sum += sample(clamp(i + half), c);
            sum -= sample(clamp(i - half - 1), c);
            out[i as usize * 4 + c] = sum;
        }
    }
}
