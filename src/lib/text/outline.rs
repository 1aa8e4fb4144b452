//! Module implementing the outlined rendering of caption text.
//!
//! Captions are drawn in two tones (a dark outline and a light fill)
//! so that they stay legible regardless of what's in the image underneath.

use rusttype::{vector, Vector};

use caption::CaptionError;
use model::{Caption, Color, Fixed, OutlineStrategy, Point};
use model::constants::MAX_PIXEL_OFFSET;
use super::canvas::Canvas;
use super::face::{Face, FaceFactory};
use super::layout::{center, measure_glyph};


/// Parameters of the outline effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineStyle {
    pub strategy: OutlineStrategy,
    /// Offset of the outline stamps, in pixels.
    pub thickness: f32,
    /// Difference between the outline & fill face sizes,
    /// as a fraction of the caption size.
    pub proportion: f32,
    pub outline_color: Color,
    pub fill_color: Color,
}


/// Renders captions onto a canvas with the outline effect.
///
/// Faces are created anew for every caption and dropped right after it's drawn,
/// so nothing about one caption carries over to the next.
pub struct OutlineRenderer<'f> {
    faces: &'f dyn FaceFactory,
    style: OutlineStyle,
}

impl<'f> OutlineRenderer<'f> {
    #[inline]
    pub fn new(faces: &'f dyn FaceFactory, style: OutlineStyle) -> Self {
        OutlineRenderer{faces, style}
    }

    #[inline]
    pub fn style(&self) -> &OutlineStyle {
        &self.style
    }

    /// Lay out & render a caption at given nominal face size.
    ///
    /// Returns the origin that the caption's layout was computed to start at.
    pub fn render(&self, canvas: &mut Canvas,
                  caption: &Caption, size: f32) -> Result<Point, CaptionError> {
        trace!("Rendering {:?} at {}px with {:?}", caption, size, self.style.strategy);
        match self.style.strategy {
            OutlineStrategy::DualFace => self.render_dual_face(canvas, caption, size),
            OutlineStrategy::EightDirectionStamp => self.render_stamped(canvas, caption, size),
            OutlineStrategy::SizeDifferentialShadow => self.render_shadow(canvas, caption, size),
        }
    }

    /// Draw every glyph twice: with the full-size face in the outline color,
    /// and then with a smaller face in the fill color.
    fn render_dual_face(&self, canvas: &mut Canvas,
                        caption: &Caption, size: f32) -> Result<Point, CaptionError> {
        let outline_offset = size * self.style.proportion;
        let outline = self.faces.make_face(size)?;
        let fill = self.faces.make_face(size - outline_offset)?;

        let origin = center(&*outline, &caption.text, caption.anchor)?;

        // The smaller fill glyph is shifted right by half of the difference
        // in advances, and up by half of the (whole pixel) size difference.
        let half = Fixed::from_f32(0.5);
        let nudge_y = -Fixed::from_int((outline_offset / 2.0) as i32);

        let mut dot = origin;
        let mut prev = None;
        for c in caption.text.chars() {
            if let Some(p) = prev {
                dot.x = dot.x + outline.kerning(p, c);
            }
            let begin = dot;
            let end = draw_glyph(&*outline, canvas, c, begin, self.style.outline_color)?;

            let (_, advance_out) = measure_glyph(&*outline, c)?;
            let (_, advance_in) = measure_glyph(&*fill, c)?;
            let offset = vector((advance_out - advance_in) * half, nudge_y);
            draw_glyph(&*fill, canvas, c, begin + offset, self.style.fill_color)?;

            // Spacing follows the outline face.
            dot = end;
            prev = Some(c);
        }
        Ok(origin)
    }

    /// Stamp every glyph in the outline color at eight offsets around it,
    /// then draw it in the fill color at its true position.
    fn render_stamped(&self, canvas: &mut Canvas,
                      caption: &Caption, size: f32) -> Result<Point, CaptionError> {
        let face = self.faces.make_face(size)?;
        let origin = center(&*face, &caption.text, caption.anchor)?;
        let thickness = self.style.thickness.max(0.0).min(MAX_PIXEL_OFFSET as f32);
        let offsets = stamp_offsets(Fixed::from_f32(thickness));

        let mut dot = origin;
        let mut prev = None;
        for c in caption.text.chars() {
            if let Some(p) = prev {
                dot.x = dot.x + face.kerning(p, c);
            }
            for &offset in &offsets {
                draw_glyph(&*face, canvas, c, dot + offset, self.style.outline_color)?;
            }
            dot = draw_glyph(&*face, canvas, c, dot, self.style.fill_color)?;
            prev = Some(c);
        }
        Ok(origin)
    }

    /// Draw the text once, in the fill color only, with a face smaller
    /// than the one used to lay it out.
    fn render_shadow(&self, canvas: &mut Canvas,
                     caption: &Caption, size: f32) -> Result<Point, CaptionError> {
        let origin = {
            let nominal = self.faces.make_face(size)?;
            center(&*nominal, &caption.text, caption.anchor)?
        };
        let face = self.faces.make_face(size * (1.0 - self.style.proportion))?;
        face.draw(canvas, &caption.text, origin, self.style.fill_color)?;
        Ok(origin)
    }
}


/// Draw a single character and return the pen position after it.
fn draw_glyph(face: &dyn Face, canvas: &mut Canvas,
              c: char, origin: Point, color: Color) -> Result<Point, CaptionError> {
    let mut buf = [0; 4];
    let end = face.draw(canvas, c.encode_utf8(&mut buf), origin, color)?;
    Ok(end)
}

/// Offsets of the outline stamps: the 4 sides & 4 diagonals, `n` away.
fn stamp_offsets(n: Fixed) -> Vec<Vector<Fixed>> {
    iproduct!(-1..2, -1..2)
        .filter(|&(dx, dy)| (dx, dy) != (0, 0))
        .map(|(dx, dy)| vector(n * Fixed::from_int(dx), n * Fixed::from_int(dy)))
        .collect()
}


#[cfg(test)]
mod tests {
    use image::Rgba;
    use rusttype::vector;
    use spectral::prelude::*;

    use caption::CaptionError;
    use model::{Caption, Color, Fixed, OutlineStrategy, pixel_point};
    use model::constants::MAX_PIXEL_OFFSET;
    use resources::Typeface;
    use text::canvas::Canvas;
    use text::testing::BoxFactory;
    use super::{OutlineRenderer, OutlineStyle, stamp_offsets};

    const BACKGROUND: Rgba<u8> = Rgba([0x40, 0x80, 0xc0, 0xff]);

    fn style(strategy: OutlineStrategy) -> OutlineStyle {
        OutlineStyle{
            strategy,
            thickness: 2.0,
            proportion: 0.1,
            outline_color: Color::black(),
            fill_color: Color::white(),
        }
    }

    fn canvas() -> Canvas {
        Canvas::from_pixel(100, 40, BACKGROUND)
    }

    #[test]
    fn stamp_offsets_are_symmetric() {
        let n = Fixed::from_int(2);
        let offsets = stamp_offsets(n);
        assert_eq!(8, offsets.len());
        for &o in &offsets {
            assert!(offsets.contains(&vector(-o.x, -o.y)));
            assert!(o.x.to_bits().abs() == n.to_bits() || o.x == Fixed::ZERO);
            assert!(o.y.to_bits().abs() == n.to_bits() || o.y == Fixed::ZERO);
        }
    }

    #[test]
    fn stamped_single_glyph() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::EightDirectionStamp));
        let caption = Caption::new("a", pixel_point(50, 20));
        let origin = renderer.render(&mut canvas(), &caption, 10.0).unwrap();

        let calls = faces.calls();
        assert_eq!(9, calls.len());
        let (outline, fill) = calls.split_at(8);
        let two = Fixed::from_int(2);
        let mut expected: Vec<_> = [(-1, -1), (-1, 0), (-1, 1), (0, -1),
                                    (0, 1), (1, -1), (1, 0), (1, 1)].iter()
            .map(|&(dx, dy)| origin + vector(two * Fixed::from_int(dx),
                                             two * Fixed::from_int(dy)))
            .collect();
        for call in outline {
            assert_eq!("A", call.text);
            assert_eq!(Color::black(), call.color);
            let pos = expected.iter().position(|&p| p == call.origin)
                .expect("unexpected outline stamp position");
            expected.remove(pos);
        }
        assert!(expected.is_empty());

        assert_eq!(Color::white(), fill[0].color);
        assert_eq!(origin, fill[0].origin);
    }

    #[test]
    fn stamp_thickness_is_capped() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, OutlineStyle{
            thickness: 1.0e9,
            ..style(OutlineStrategy::EightDirectionStamp)
        });
        let mut canvas = canvas();
        let origin = renderer.render(&mut canvas, &Caption::new("a", pixel_point(50, 20)), 10.0)
            .unwrap();

        let calls = faces.calls();
        assert_eq!(9, calls.len());
        let max = Fixed::from_int(MAX_PIXEL_OFFSET as i32);
        assert!(calls[..8].iter().any(|c| c.origin.x == origin.x + max));
        assert!(calls[..8].iter().any(|c| c.origin.y == origin.y - max));
        // Outline stamps land far outside the canvas, so only the fill shows.
        assert_eq!(Rgba([255, 255, 255, 255]), *canvas.get_pixel(50, 20));
        assert_eq!(BACKGROUND, *canvas.get_pixel(43, 20));
    }

    #[test]
    fn stamped_pixels() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::EightDirectionStamp));
        let mut canvas = canvas();
        renderer.render(&mut canvas, &Caption::new("I", pixel_point(50, 20)), 10.0).unwrap();

        // Glyph box spans x=45..55, y=15..25; the outline pokes out 2px around it.
        assert_eq!(Rgba([255, 255, 255, 255]), *canvas.get_pixel(50, 20));
        assert_eq!(Rgba([0, 0, 0, 255]), *canvas.get_pixel(43, 20));
        assert_eq!(Rgba([0, 0, 0, 255]), *canvas.get_pixel(56, 26));
        assert_eq!(BACKGROUND, *canvas.get_pixel(42, 20));
        assert_eq!(BACKGROUND, *canvas.get_pixel(50, 28));
    }

    #[test]
    fn dual_face_sizes_and_order() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::DualFace));
        let caption = Caption::new("ab", pixel_point(50, 20));
        let origin = renderer.render(&mut canvas(), &caption, 20.0).unwrap();

        assert_eq!(vec![20.0, 18.0], faces.sizes());
        let calls = faces.calls();
        assert_eq!(4, calls.len());

        // Outline first, then fill, for every glyph.
        let colors: Vec<_> = calls.iter().map(|c| c.color).collect();
        assert_eq!(vec![Color::black(), Color::white(), Color::black(), Color::white()], colors);
        let sizes: Vec<_> = calls.iter().map(|c| c.size).collect();
        assert_eq!(vec![20.0, 18.0, 20.0, 18.0], sizes);

        // Fill glyph is shifted by half the advance difference (2px / 2)
        // and raised by half of the size difference (2px / 2).
        assert_eq!(origin, calls[0].origin);
        assert_eq!(origin + vector(Fixed::from_int(1), Fixed::from_int(-1)), calls[1].origin);

        // The next glyph starts where the outline glyph ended.
        assert_eq!(origin.x + Fixed::from_int(20), calls[2].origin.x);
        assert_eq!(origin.y, calls[2].origin.y);
    }

    #[test]
    fn dual_face_layout_uses_outline_size() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::DualFace));
        let origin = renderer.render(
            &mut canvas(), &Caption::new("ab", pixel_point(50, 20)), 20.0).unwrap();
        assert_eq!(pixel_point(50 - 20, 20 + 10), origin);
    }

    #[test]
    fn shadow_draws_fill_only_with_smaller_face() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(
            &faces, style(OutlineStrategy::SizeDifferentialShadow));
        let origin = renderer.render(
            &mut canvas(), &Caption::new("ab", pixel_point(50, 20)), 20.0).unwrap();

        // Layout with the nominal size...
        assert_eq!(pixel_point(30, 30), origin);
        // ...but drawing with the smaller one.
        assert_eq!(vec![20.0, 18.0], faces.sizes());
        let calls = faces.calls();
        assert_eq!(1, calls.len());
        assert_eq!("AB", calls[0].text);
        assert_eq!(18.0, calls[0].size);
        assert_eq!(Color::white(), calls[0].color);
    }

    #[test]
    fn empty_caption_is_noop() {
        for strategy in OutlineStrategy::iter_variants() {
            let faces = BoxFactory::new();
            let renderer = OutlineRenderer::new(&faces, style(strategy));
            let mut canvas = canvas();
            let anchor = pixel_point(50, 20);
            let origin = renderer.render(&mut canvas, &Caption::new("", anchor), 10.0).unwrap();

            assert_eq!(anchor, origin);
            assert!(canvas.pixels().all(|p| *p == BACKGROUND),
                "{} strategy modified the canvas", strategy);
        }
    }

    #[test]
    fn rendering_is_repeatable() {
        for strategy in OutlineStrategy::iter_variants() {
            let faces = BoxFactory::new();
            let renderer = OutlineRenderer::new(&faces, style(strategy));
            let caption = Caption::new("Lulz", pixel_point(50, 20));

            let mut first = canvas();
            let mut second = canvas();
            renderer.render(&mut first, &caption, 12.0).unwrap();
            renderer.render(&mut second, &caption, 12.0).unwrap();
            assert!(first == second, "{} strategy isn't repeatable", strategy);
        }
    }

    #[test]
    fn draw_failure_aborts() {
        let faces = BoxFactory::failing_on("B");
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::EightDirectionStamp));
        let result = renderer.render(&mut canvas(), &Caption::new("ab", pixel_point(50, 20)), 10.0);
        assert_that!(result).is_err();
        match result {
            Err(CaptionError::Render(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn invalid_size() {
        let faces = BoxFactory::new();
        let renderer = OutlineRenderer::new(&faces, style(OutlineStrategy::DualFace));
        match renderer.render(&mut canvas(), &Caption::new("ab", pixel_point(0, 0)), 0.0) {
            Err(CaptionError::InvalidSize(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn real_font_stays_in_caption_band() {
        let typeface = Typeface::bundled().unwrap();
        let anchor = pixel_point(120, 100);
        let size = 60.0;
        for strategy in OutlineStrategy::iter_variants() {
            let renderer = OutlineRenderer::new(&typeface, style(strategy));
            let mut canvas = Canvas::from_pixel(240, 200, BACKGROUND);
            renderer.render(&mut canvas, &Caption::new("hi", anchor), size).unwrap();

            let mut painted = 0;
            let mut darkened = 0;
            for (x, y, p) in canvas.enumerate_pixels() {
                if *p == BACKGROUND {
                    continue;
                }
                painted += 1;
                assert!(60 <= x && x < 180 && 40 <= y && y < 160,
                    "{:?} painted ({}, {}) outside of the caption band", strategy, x, y);
                if p.0[2] <= 0x40 {
                    darkened += 1;
                }
            }
            assert!(painted > 0, "{:?} painted nothing", strategy);
            assert!(canvas.pixels().any(|p| *p == Rgba([0xff, 0xff, 0xff, 0xff])),
                "{:?} has no solid fill", strategy);
            match strategy {
                OutlineStrategy::SizeDifferentialShadow => assert_eq!(0, darkened),
                _ => assert!(darkened > 0, "{:?} has no visible outline", strategy),
            }
        }
    }
}
