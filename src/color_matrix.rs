//! Saturation adjustment through a 4x4 fixed-point color matrix.
//!
//! The matrix is laid out `[input channel][output channel]` in B, G, R, A
//! order, so each output channel is a blend of the pixel's luminance and its
//! own value. Alpha is passed through untouched.

use crate::pixel::PixelBuffer;

/// Fixed-point scale of the integer coefficients.
pub const DIVISOR: i32 = 256;

/// Where B, G, R and A live inside an RGBA pixel.
const BGRA: [usize; 4] = [2, 1, 0, 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaturationMatrix {
    coefficients: [[i16; 4]; 4],
}

impl SaturationMatrix {
    pub fn new(saturation_delta: f64) -> Self {
        let floating = Self::floating(saturation_delta);
        let mut coefficients = [[0i16; 4]; 4];
        for (row, source) in coefficients.iter_mut().zip(floating.iter()) {
            for (c, f) in row.iter_mut().zip(source.iter()) {
                *c = (f * DIVISOR as f64).round() as i16;
            }
        }
        Self { coefficients }
    }

    /// `s = 1` is the identity, `s = 0` collapses every pixel to its
    /// luminance, negative values push colors past gray.
    pub fn floating(s: f64) -> [[f64; 4]; 4] {
        [
            [0.0722 + 0.9278 * s, 0.0722 - 0.0722 * s, 0.0722 - 0.0722 * s, 0.0],
            [0.7152 - 0.7152 * s, 0.7152 + 0.2848 * s, 0.7152 - 0.7152 * s, 0.0],
            [0.2126 - 0.2126 * s, 0.2126 - 0.2126 * s, 0.2126 + 0.7873 * s, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    pub fn coefficients(&self) -> &[[i16; 4]; 4] {
        &self.coefficients
    }

    pub fn divisor(&self) -> i32 {
        DIVISOR
    }

    pub fn transform(&self, pixel: [u8; 4]) -> [u8; 4] {
        let input = BGRA.map(|i| pixel[i] as i32);
        let mut out = [0u8; 4];
        for (j, &channel) in BGRA.iter().enumerate() {
            let sum: i32 = (0..4)
                .map(|i| input[i] * self.coefficients[i][j] as i32)
                .sum();
            out[channel] = divide_round(sum, DIVISOR).clamp(0, 255) as u8;
        }
        out
    }

    /// Writes the transformed `src` into `dst`. Both buffers must have the
    /// same dimensions.
    pub fn apply(&self, src: &PixelBuffer, dst: &mut PixelBuffer) {
        assert_eq!(src.size(), dst.size(), "matrix multiply needs same-sized buffers");
        for y in 0..src.height() {
            let row = src.row(y);
            let out = dst.row_mut(y);
            for (s, d) in row.chunks_exact(4).zip(out.chunks_exact_mut(4)) {
                d.copy_from_slice(&self.transform([s[0], s[1], s[2], s[3]]));
            }
        }
    }
}

fn divide_round(value: i32, divisor: i32) -> i32 {
    if value >= 0 {
        (value + divisor / 2) / divisor
    } else {
        (value - divisor / 2) / divisor
    }
}
