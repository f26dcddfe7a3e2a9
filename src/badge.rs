//! Build badge: a frosted band across the bottom of an icon carrying the
//! build type, version and number.

use image::imageops;
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::effect::{effect_layer, EffectError, EffectParams};
use crate::geometry::{Rect, Scale, Size};
use crate::pixel::PixelBuffer;
use crate::text::{self, Align, TextStyle};

/// Build type shown when none is given.
pub const DEFAULT_BUILD_TYPE: &str = "β";

/// Share of the icon height covered by the band.
const OVERLAY_HEIGHT: f64 = 0.35;
/// Share of the icon width given to the build type.
const TYPE_WIDTH: f64 = 0.4;
const TYPE_FONT: f64 = 0.8;
const VERSION_FONT: f64 = 0.45;
const Y_PADDING: f64 = 0.07;
const X_PADDING: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeParams {
    pub build_version: String,
    pub build_number: String,
    /// Meant to be about two characters wide; longer values are drawn
    /// smaller, not rejected.
    pub build_type: String,
}

/// Where everything goes, in top-left pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeLayout {
    pub overlay: Rect,
    pub build_type: Rect,
    pub build_version: Rect,
    pub build_number: Rect,
    pub type_font_size: f64,
    pub version_font_size: f64,
}

pub fn badge_layout(size: Size) -> BadgeLayout {
    let width = size.width as f64;
    let height = size.height as f64;
    let band = height * OVERLAY_HEIGHT;
    let y_padding = band * Y_PADDING;
    let x_padding = width * X_PADDING;

    let type_max_x = width * TYPE_WIDTH;
    let build_type = Rect::from_bottom(
        x_padding,
        0.0,
        type_max_x - x_padding,
        band + y_padding,
        height,
    );
    let build_version = Rect::from_bottom(
        type_max_x,
        band * 0.5 + y_padding,
        width - type_max_x,
        band * 0.5,
        height,
    );
    let build_number = Rect::from_bottom(
        type_max_x,
        y_padding * 1.25,
        build_version.width,
        build_version.height,
        height,
    );

    BadgeLayout {
        overlay: Rect::from_bottom(0.0, 0.0, width, band, height),
        build_type,
        build_version,
        build_number,
        type_font_size: band * TYPE_FONT,
        version_font_size: band * VERSION_FONT,
    }
}

/// Renders `source` with the badge at the scaled size.
pub fn render_badge(
    source: &RgbaImage,
    params: &BadgeParams,
    scale: Scale,
) -> Result<RgbaImage, EffectError> {
    let size = scale.logical_size(Size::new(source.width(), source.height()));
    let frosted = effect_layer(
        source,
        &EffectParams::frosted_bar(size.width as f64),
        None,
        scale,
    )?;
    let layout = badge_layout(size);

    let mut canvas = Canvas::new(size).ok_or(EffectError::InvalidSize {
        width: size.width,
        height: size.height,
    })?;
    canvas.draw_image(source);

    canvas.save();
    canvas.clip_to_rect(layout.overlay);
    canvas.draw_buffer(&frosted);
    canvas.restore();

    let color = average_color(source);
    let type_style = TextStyle {
        size: layout.type_font_size,
        color,
        align: Align::Center,
    };
    let version_style = TextStyle {
        size: layout.version_font_size,
        color,
        align: Align::Left,
    };

    text::draw_text(&mut canvas, &params.build_type, layout.build_type, &type_style);
    text::draw_text(
        &mut canvas,
        &params.build_version,
        layout.build_version,
        &version_style,
    );
    text::draw_text(
        &mut canvas,
        &params.build_number,
        layout.build_number,
        &version_style,
    );

    Ok(canvas.into_image())
}

/// Average color of the whole image, used as the label color.
///
/// The image is premultiplied and area-sampled down to one pixel. A visible
/// sample is scaled by `alpha / 255` once more; a fully transparent one is
/// read as-is.
pub fn average_color(image: &RgbaImage) -> Color {
    if image.width() == 0 || image.height() == 0 {
        return Color::rgba(0.0, 0.0, 0.0, 0.0);
    }
    let premultiplied = PixelBuffer::from_image(image).to_raw_image();
    let [r, g, b, a] = imageops::thumbnail(&premultiplied, 1, 1).get_pixel(0, 0).0;
    let alpha = a as f64 / 255.0;

    if a > 0 {
        let multiplier = alpha / 255.0;
        Color::rgba(
            r as f64 * multiplier,
            g as f64 * multiplier,
            b as f64 * multiplier,
            alpha,
        )
    } else {
        Color::rgba(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, alpha)
    }
}
