use std::fmt;

/// Pixel dimensions of an image or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in top-left-origin pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rect from bottom-left-origin coordinates inside a frame of
    /// `frame_height`. Layout is measured from the bottom edge up.
    pub fn from_bottom(x: f64, y: f64, width: f64, height: f64, frame_height: f64) -> Self {
        Self::new(x, frame_height - y - height, width, height)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// A pixel belongs to the rect when its center does.
    pub fn contains_pixel(&self, px: u32, py: u32) -> bool {
        let cx = px as f64 + 0.5;
        let cy = py as f64 + 0.5;
        cx >= self.x && cx < self.max_x() && cy >= self.y && cy < self.max_y()
    }
}

/// Output pixels per source pixel.
///
/// Stands in for "recommended content scale / display backing scale" so the
/// pipeline never has to ask a display for it. 1.0 keeps icons at their
/// decoded size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub const IDENTITY: Scale = Scale(1.0);

    /// Returns `None` unless `ratio` is finite and positive.
    pub fn new(ratio: f64) -> Option<Self> {
        (ratio.is_finite() && ratio > 0.0).then_some(Scale(ratio))
    }

    pub fn ratio(&self) -> f64 {
        self.0
    }

    pub fn logical_size(&self, pixels: Size) -> Size {
        let scale = |v: u32| ((v as f64 * self.0).round() as u32).max(1);
        Size::new(scale(pixels.width), scale(pixels.height))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
