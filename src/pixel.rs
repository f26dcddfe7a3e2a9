//! Premultiplied RGBA8 pixel buffers.
//!
//! Decoded images carry straight alpha; every drawing and filtering step
//! works on premultiplied samples so that blurring a half-transparent edge
//! does not drag in the color of fully transparent neighbours.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tiny_skia::Pixmap;

use crate::geometry::Size;

/// Rows are padded to this many bytes.
const ROW_ALIGNMENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
}

impl PixelBuffer {
    /// Transparent buffer with aligned rows.
    pub fn new(size: Size) -> Self {
        let row = size.width as usize * 4;
        let stride = row.div_ceil(ROW_ALIGNMENT) * ROW_ALIGNMENT;
        Self::with_stride(size, stride)
    }

    /// Transparent buffer with an explicit row stride. `stride` is raised to
    /// `width * 4` if it is smaller.
    pub fn with_stride(size: Size, stride: usize) -> Self {
        let stride = stride.max(size.width as usize * 4);
        Self {
            data: vec![0; stride * size.height as usize],
            width: size.width,
            height: size.height,
            stride,
        }
    }

    /// Premultiplies a straight-alpha image.
    pub fn from_image(image: &RgbaImage) -> Self {
        let mut buffer = Self::new(Size::new(image.width(), image.height()));
        for (x, y, pixel) in image.enumerate_pixels() {
            buffer.put_pixel(x, y, premultiply(pixel.0));
        }
        buffer
    }

    /// Draws `image` scaled to `size`, the way a graphics context draws an
    /// image into a rect. Resampling happens on premultiplied samples.
    pub fn from_image_scaled(image: &RgbaImage, size: Size) -> Self {
        let premultiplied = Self::from_image(image);
        if premultiplied.size() == size {
            return premultiplied;
        }
        let resized = imageops::resize(
            &premultiplied.to_raw_image(),
            size.width,
            size.height,
            FilterType::Triangle,
        );
        Self::from_raw_image(&resized)
    }

    /// Un-premultiplies into a straight-alpha image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(unpremultiply(self.pixel(x, y)))
        })
    }

    /// Copies the premultiplied samples into an `RgbaImage` unchanged, for
    /// handing the buffer to `imageops`.
    pub fn to_raw_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.pixel(x, y)))
    }

    /// Inverse of [`PixelBuffer::to_raw_image`]: samples are taken as
    /// already premultiplied.
    pub fn from_raw_image(image: &RgbaImage) -> Self {
        let mut buffer = Self::new(Size::new(image.width(), image.height()));
        for (x, y, pixel) in image.enumerate_pixels() {
            buffer.put_pixel(x, y, pixel.0);
        }
        buffer
    }

    /// Packs the rows into a [`Pixmap`] for compositing. Channels are
    /// capped at alpha, since a saturation boost can push them past it and
    /// the pixmap only holds valid premultiplied colors. `None` for an
    /// empty buffer.
    pub fn to_pixmap(&self) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height)?;
        let row_len = self.width as usize * 4;
        for (y, dst) in pixmap.data_mut().chunks_exact_mut(row_len).enumerate() {
            dst.copy_from_slice(self.row(y as u32));
            for px in dst.chunks_exact_mut(4) {
                let a = px[3];
                for c in &mut px[..3] {
                    *c = (*c).min(a);
                }
            }
        }
        Some(pixmap)
    }

    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut buffer = Self::new(Size::new(pixmap.width(), pixmap.height()));
        let row_len = pixmap.width() as usize * 4;
        for (y, src) in pixmap.data().chunks_exact(row_len).enumerate() {
            buffer.row_mut(y as u32).copy_from_slice(src);
        }
        buffer
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width * 4` meaningful bytes of row `y`, without padding.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * 4]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let len = self.width as usize * 4;
        &mut self.data[start..start + len]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = y as usize * self.stride + x as usize * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let i = y as usize * self.stride + x as usize * 4;
        self.data[i..i + 4].copy_from_slice(&pixel);
    }

    pub fn fill(&mut self, pixel: [u8; 4]) {
        for y in 0..self.height {
            for chunk in self.row_mut(y).chunks_exact_mut(4) {
                chunk.copy_from_slice(&pixel);
            }
        }
    }
}

pub fn premultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let mul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    [mul(r), mul(g), mul(b), a]
}

/// Channels above alpha (possible after a saturation boost) clamp to 255.
pub fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let div = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
    [div(r), div(g), div(b), a]
}
