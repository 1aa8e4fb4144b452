//! Module defining the pixel buffer that captions are drawn onto.

use image::{Pixel, RgbaImage};

use model::Color;


/// Mutable RGBA pixel buffer that captions are rendered onto.
pub type Canvas = RgbaImage;


/// Blend given color onto a single pixel of the canvas,
/// using glyph coverage (in the `0.0..=1.0` range) as opacity.
///
/// Pixels outside of the canvas are silently clipped.
#[inline]
pub fn paint(canvas: &mut Canvas, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = (coverage.max(0.0).min(1.0) * 255.0).round() as u8;
    if alpha == 0 {
        return;
    }
    canvas.get_pixel_mut(x, y).blend(&color.to_rgba(alpha));
}
