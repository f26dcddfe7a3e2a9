//! Frosted-glass effect: blur, saturation boost and tint over an image.
//!
//! The named presets are fixed parameter sets for the one primitive,
//! [`apply_effect`].

use image::RgbaImage;
use thiserror::Error;

use crate::box_blur::{self, MIN_RADIUS};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::color_matrix::SaturationMatrix;
use crate::geometry::{Scale, Size};
use crate::pixel::PixelBuffer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EffectError {
    #[error("invalid image size {width}x{height}: both dimensions must be >= 1")]
    InvalidSize { width: u32, height: u32 },

    #[error("mask image is empty")]
    InvalidMask,
}

/// Alpha forced onto the color passed to [`EffectParams::tint`].
const TINT_EFFECT_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// Gaussian-equivalent blur radius in output pixels.
    pub blur_radius: f64,
    /// Painted over the whole result last.
    pub tint: Option<Color>,
    /// 1.0 leaves saturation alone.
    pub saturation_delta: f64,
}

impl EffectParams {
    pub fn light() -> Self {
        Self {
            blur_radius: 30.0,
            tint: Some(Color::white(1.0, 0.3)),
            saturation_delta: 1.8,
        }
    }

    pub fn extra_light() -> Self {
        Self {
            blur_radius: 20.0,
            tint: Some(Color::white(0.97, 0.82)),
            saturation_delta: 1.8,
        }
    }

    pub fn dark() -> Self {
        Self {
            blur_radius: 20.0,
            tint: Some(Color::white(0.11, 0.73)),
            saturation_delta: 1.8,
        }
    }

    /// Desaturating blur tinted with `color` at a fixed alpha. Gray colors
    /// stay gray.
    pub fn tint(color: Color) -> Self {
        let effect_color = if color.is_gray() {
            Color::white(color.r, TINT_EFFECT_ALPHA)
        } else {
            color.with_alpha(TINT_EFFECT_ALPHA)
        };
        Self {
            blur_radius: 10.0,
            tint: Some(effect_color),
            saturation_delta: -1.0,
        }
    }

    /// The dark band behind badge labels on an icon `width` pixels wide.
    pub fn frosted_bar(width: f64) -> Self {
        Self {
            blur_radius: width * 0.1,
            tint: Some(Color::white(0.11, 0.3)),
            saturation_delta: 1.8,
        }
    }

    pub fn has_blur(&self) -> bool {
        self.blur_radius > MIN_RADIUS
    }

    pub fn has_saturation_change(&self) -> bool {
        (self.saturation_delta - 1.0).abs() > f32::EPSILON as f64
    }
}

/// Which of the two effect buffers holds the latest result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferId {
    Input,
    Output,
}

impl BufferId {
    fn other(self) -> Self {
        match self {
            BufferId::Input => BufferId::Output,
            BufferId::Output => BufferId::Input,
        }
    }
}

/// Input/output buffer pair for the blur and saturation stages.
pub struct EffectBuffers {
    input: PixelBuffer,
    output: PixelBuffer,
    current: BufferId,
}

impl EffectBuffers {
    pub fn new(source: PixelBuffer) -> Self {
        let output = PixelBuffer::with_stride(source.size(), source.stride());
        Self {
            input: source,
            output,
            current: BufferId::Input,
        }
    }

    pub fn current(&self) -> BufferId {
        self.current
    }

    pub fn blur(&mut self, radius: f64) {
        if box_blur::blur(&mut self.input, &mut self.output, radius) {
            self.current = BufferId::Output;
        }
    }

    /// Reads the current buffer, writes the other one.
    pub fn saturate(&mut self, saturation_delta: f64) {
        let matrix = SaturationMatrix::new(saturation_delta);
        match self.current {
            BufferId::Input => matrix.apply(&self.input, &mut self.output),
            BufferId::Output => matrix.apply(&self.output, &mut self.input),
        }
        self.current = self.current.other();
    }

    pub fn into_result(self) -> PixelBuffer {
        match self.current {
            BufferId::Input => self.input,
            BufferId::Output => self.output,
        }
    }
}

/// Runs the effect over `source` and composites it at the scaled size.
///
/// Without blur the blurred layer is not drawn, so a saturation-only call
/// only shows its tint.
pub fn apply_effect(
    source: &RgbaImage,
    params: &EffectParams,
    mask: Option<&RgbaImage>,
    scale: Scale,
) -> Result<RgbaImage, EffectError> {
    let size = check_inputs(source, mask, scale)?;
    if is_identity(params) && size == image_size(source) {
        return Ok(source.clone());
    }
    Ok(effect_layer(source, params, mask, scale)?.to_image())
}

/// [`apply_effect`] without the final un-premultiply, for callers that
/// composite the result again.
pub fn effect_layer(
    source: &RgbaImage,
    params: &EffectParams,
    mask: Option<&RgbaImage>,
    scale: Scale,
) -> Result<PixelBuffer, EffectError> {
    let size = check_inputs(source, mask, scale)?;
    let base = PixelBuffer::from_image_scaled(source, size);
    if is_identity(params) {
        return Ok(base);
    }

    let mut canvas = Canvas::new(size).ok_or(EffectError::InvalidSize {
        width: size.width,
        height: size.height,
    })?;
    canvas.draw_buffer(&base);

    if params.has_blur() {
        let mut buffers = EffectBuffers::new(base);
        buffers.blur(params.blur_radius);
        if params.has_saturation_change() {
            buffers.saturate(params.saturation_delta);
        }
        let effect = buffers.into_result();

        canvas.save();
        if let Some(mask) = mask {
            canvas.clip_to_mask(mask);
        }
        canvas.draw_buffer(&effect);
        canvas.restore();
    }

    if let Some(tint) = params.tint {
        canvas.fill_rect(size.bounds(), tint);
    }

    Ok(canvas.into_buffer())
}

/// Nothing is painted over the base image.
fn is_identity(params: &EffectParams) -> bool {
    !params.has_blur() && params.tint.is_none()
}

fn image_size(image: &RgbaImage) -> Size {
    Size::new(image.width(), image.height())
}

/// Validates the inputs and returns the output size.
fn check_inputs(
    source: &RgbaImage,
    mask: Option<&RgbaImage>,
    scale: Scale,
) -> Result<Size, EffectError> {
    let source_size = image_size(source);
    if source_size.is_empty() {
        return Err(EffectError::InvalidSize {
            width: source_size.width,
            height: source_size.height,
        });
    }
    if mask.is_some_and(|m| m.width() == 0 || m.height() == 0) {
        return Err(EffectError::InvalidMask);
    }
    Ok(scale.logical_size(source_size))
}
