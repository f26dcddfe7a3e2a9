//! Drawing context over a [`tiny_skia::Pixmap`].
//!
//! Everything is painted source-over through the current clip. The clip is
//! a [`Mask`] that rects and luminance masks narrow, restored with
//! [`Canvas::save`] / [`Canvas::restore`].

use image::RgbaImage;
use tiny_skia::{
    BlendMode, FillRule, FilterQuality, Mask, MaskType, Paint, PathBuilder, Pixmap, PixmapPaint,
    Transform,
};

use crate::color::Color;
use crate::geometry::{Rect, Size};
use crate::pixel::PixelBuffer;

pub struct Canvas {
    pixmap: Pixmap,
    clip: Option<Mask>,
    saved: Vec<Option<Mask>>,
}

impl Canvas {
    /// Transparent canvas, `None` when `size` is empty.
    pub fn new(size: Size) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(size.width, size.height)?,
            clip: None,
            saved: Vec::new(),
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn into_buffer(self) -> PixelBuffer {
        PixelBuffer::from_pixmap(&self.pixmap)
    }

    pub fn into_image(self) -> RgbaImage {
        self.into_buffer().to_image()
    }

    pub fn save(&mut self) {
        self.saved.push(self.clip.clone());
    }

    /// Restores the clip pushed by the matching [`Canvas::save`]. Unbalanced
    /// calls leave the clip unchanged.
    pub fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    /// Pixels whose centers fall outside `rect` are clipped away.
    pub fn clip_to_rect(&mut self, rect: Rect) {
        let size = self.size();
        let path = to_skia_rect(rect).map(PathBuilder::from_rect);
        let clip = match (self.clip.take(), path) {
            (Some(mut clip), Some(path)) => {
                clip.intersect_path(&path, FillRule::Winding, false, Transform::identity());
                Some(clip)
            }
            (None, Some(path)) => Mask::new(size.width, size.height).map(|mut clip| {
                clip.fill_path(&path, FillRule::Winding, false, Transform::identity());
                clip
            }),
            // An empty rect hides everything.
            (clip, None) => clip.or_else(|| Mask::new(size.width, size.height)).map(|mut clip| {
                clip.data_mut().fill(0);
                clip
            }),
        };
        self.clip = clip;
    }

    /// Narrows the clip by `mask`, stretched over the whole canvas. A mask
    /// pixel's coverage is its luminance times its alpha.
    pub fn clip_to_mask(&mut self, mask: &RgbaImage) {
        let size = self.size();
        let Some(pixmap) = PixelBuffer::from_image_scaled(mask, size).to_pixmap() else {
            return;
        };
        let coverage = Mask::from_pixmap(pixmap.as_ref(), MaskType::Luminance);
        match &mut self.clip {
            Some(clip) => {
                for (c, m) in clip.data_mut().iter_mut().zip(coverage.data()) {
                    *c = mul_div_255(*c, *m);
                }
            }
            None => self.clip = Some(coverage),
        }
    }

    /// Draws a straight-alpha image stretched over the whole canvas.
    pub fn draw_image(&mut self, image: &RgbaImage) {
        let scaled = PixelBuffer::from_image_scaled(image, self.size());
        self.draw_buffer(&scaled);
    }

    /// Draws a premultiplied buffer of the canvas's size.
    pub fn draw_buffer(&mut self, src: &PixelBuffer) {
        assert_eq!(src.size(), self.size(), "buffer must match the canvas");
        let Some(src) = src.to_pixmap() else {
            return;
        };
        let paint = PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Nearest,
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            src.as_ref(),
            &paint,
            Transform::identity(),
            self.clip.as_ref(),
        );
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = false;
        paint.blend_mode = BlendMode::SourceOver;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), self.clip.as_ref());
    }
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

fn mul_div_255(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}
