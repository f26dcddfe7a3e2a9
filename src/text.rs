//! Label rendering from the embedded 8x8 bitmap font.
//!
//! A glyph is `size` pixels tall and as wide as its inked columns, with one
//! blank column between glyphs. Text wider than its frame is drawn smaller
//! so that the whole label stays visible. Characters missing from the
//! basic table fall back to the Latin and Greek tables (the default build
//! type is "β"), then to '?'.

use font8x8::{UnicodeFonts, BASIC_FONTS, GREEK_FONTS, LATIN_FONTS};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Rect;

/// Rows and columns in a glyph.
const GLYPH_CELLS: f64 = 8.0;
/// Advance of a glyph with no ink, such as a space.
const BLANK_ADVANCE: u32 = 4;
/// Blank columns between two glyphs.
const GLYPH_GAP: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph height in pixels; the largest size the label is drawn at.
    pub size: f64,
    pub color: Color,
    pub align: Align,
}

fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// First inked column and the number of columns up to the last inked one.
fn ink_span(bits: [u8; 8]) -> Option<(u32, u32)> {
    let columns = bits.iter().fold(0u8, |acc, row| acc | row);
    if columns == 0 {
        return None;
    }
    // Bit 0 is the leftmost column.
    let first = columns.trailing_zeros();
    let last = 7 - columns.leading_zeros();
    Some((first, last - first + 1))
}

fn advance(bits: [u8; 8]) -> u32 {
    ink_span(bits).map_or(BLANK_ADVANCE, |(_, width)| width)
}

/// Width of `text` drawn at `size`, in pixels.
pub fn measure(text: &str, size: f64) -> f64 {
    let glyphs = text.chars().count() as u32;
    if glyphs == 0 {
        return 0.0;
    }
    let columns: u32 = text.chars().map(|ch| advance(glyph(ch))).sum();
    (columns + GLYPH_GAP * (glyphs - 1)) as f64 * size / GLYPH_CELLS
}

/// `size`, reduced just enough for `text` to fit in `max_width`.
pub fn fit_size(text: &str, size: f64, max_width: f64) -> f64 {
    let width = measure(text, size);
    if width > max_width && width > 0.0 {
        size * max_width.max(0.0) / width
    } else {
        size
    }
}

/// Where the text's line box lands when drawn into `frame`: the fitted
/// size is the box height.
pub fn line_bounds(text: &str, frame: Rect, style: &TextStyle) -> Rect {
    let size = fit_size(text, style.size, frame.width);
    let width = measure(text, size);
    let x = match style.align {
        Align::Left => frame.x,
        Align::Center => frame.x + (frame.width - width) / 2.0,
    };
    Rect::new(x, frame.y, width, size)
}

/// Draws `text` from the top edge of `frame`, clipped to it.
pub fn draw_text(canvas: &mut Canvas, text: &str, frame: Rect, style: &TextStyle) {
    if style.size <= 0.0 || text.is_empty() {
        return;
    }
    let line = line_bounds(text, frame, style);
    let unit = line.height / GLYPH_CELLS;
    if unit <= 0.0 {
        return;
    }

    canvas.save();
    canvas.clip_to_rect(frame);
    let mut pen = line.x;
    for ch in text.chars() {
        let bits = glyph(ch);
        match ink_span(bits) {
            Some((first, width)) => {
                draw_glyph(canvas, bits, first, pen, line.y, unit, style.color);
                pen += (width + GLYPH_GAP) as f64 * unit;
            }
            None => pen += (BLANK_ADVANCE + GLYPH_GAP) as f64 * unit,
        }
    }
    canvas.restore();
}

/// One square of side `unit` per lit bit, with column `first` at `x`.
fn draw_glyph(
    canvas: &mut Canvas,
    bits: [u8; 8],
    first: u32,
    x: f64,
    y: f64,
    unit: f64,
    color: Color,
) {
    for (row, line) in bits.iter().enumerate() {
        for col in first..8 {
            if (line >> col) & 1 == 1 {
                let cell = Rect::new(
                    x + (col - first) as f64 * unit,
                    y + row as f64 * unit,
                    unit,
                    unit,
                );
                canvas.fill_rect(cell, color);
            }
        }
    }
}
