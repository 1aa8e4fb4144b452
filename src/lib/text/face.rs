//! Module defining text faces, i.e. typefaces rasterized at a fixed size.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use rusttype::{point, Rect, Scale, ScaledGlyph};

use caption::{CaptionError, RenderError};
use model::{Bounds, Color, Fixed, Point};
use model::types::fixed::{empty_bounds, to_rusttype_point};
use resources::Typeface;
use super::canvas::{Canvas, paint};


/// A typeface at a particular pixel size, able to measure & draw text.
///
/// The size of a face never changes after it has been created.
pub trait Face {
    /// Pixel size (em height) of the face.
    fn size(&self) -> f32;

    /// Measure the text as if it were drawn starting at (0, 0).
    ///
    /// Returns the bounding box of the text's visible pixels
    /// and the advance, i.e. how far the pen moves after drawing it.
    fn measure(&self, text: &str) -> Result<(Bounds, Fixed), RenderError>;

    /// Horizontal kerning adjustment between two consecutive characters.
    fn kerning(&self, _first: char, _second: char) -> Fixed {
        Fixed::ZERO
    }

    /// Draw the text onto the canvas with its baseline starting at `origin`.
    ///
    /// Returns the pen position after the last glyph.
    fn draw(&self, canvas: &mut Canvas, text: &str,
            origin: Point, color: Color) -> Result<Point, RenderError>;
}

/// Source of faces at arbitrary sizes.
pub trait FaceFactory {
    /// Create a face of given pixel size.
    ///
    /// The face is released when the returned box is dropped.
    fn make_face<'f>(&'f self, size: f32) -> Result<Box<dyn Face + 'f>, CaptionError>;

    /// Characters of given text that faces from this factory cannot render.
    fn missing_glyphs(&self, _text: &str) -> Vec<char> {
        vec![]
    }
}

/// Check that a face size is usable for rendering.
pub(crate) fn check_size(size: f32) -> Result<f32, CaptionError> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(CaptionError::InvalidSize(size))
    }
}


impl FaceFactory for Typeface {
    fn make_face<'f>(&'f self, size: f32) -> Result<Box<dyn Face + 'f>, CaptionError> {
        let face = ScaledFace::new(self, size)?;
        Ok(Box::new(face))
    }

    fn missing_glyphs(&self, text: &str) -> Vec<char> {
        Typeface::missing_glyphs(self, text)
    }
}


/// Face backed by a rusttype font.
///
/// Glyphs are cached per face as they are first used.
pub struct ScaledFace<'t> {
    typeface: &'t Typeface,
    size: f32,
    scale: Scale,
    glyphs: RefCell<HashMap<char, ScaledGlyph<'static>>>,
}

impl<'t> ScaledFace<'t> {
    pub fn new(typeface: &'t Typeface, size: f32) -> Result<Self, CaptionError> {
        let size = check_size(size)?;
        let scale = typeface.em_scale(size);
        trace!("Creating face of size {}px (scale: {:?})", size, scale);
        Ok(ScaledFace{typeface, size, scale, glyphs: RefCell::new(HashMap::new())})
    }

    /// Number of distinct glyphs this face has rasterized so far.
    #[inline]
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.borrow().len()
    }

    fn glyph(&self, c: char) -> ScaledGlyph<'static> {
        let mut glyphs = self.glyphs.borrow_mut();
        glyphs.entry(c)
            .or_insert_with(|| self.typeface.font().glyph(c).scaled(self.scale))
            .clone()
    }

    fn advance_of(&self, c: char, glyph: &ScaledGlyph) -> Result<Fixed, RenderError> {
        let advance = glyph.h_metrics().advance_width;
        if !advance.is_finite() {
            return Err(RenderError::Metrics(c));
        }
        Ok(Fixed::from_f32(advance))
    }
}

impl<'t> Face for ScaledFace<'t> {
    fn size(&self) -> f32 {
        self.size
    }

    fn measure(&self, text: &str) -> Result<(Bounds, Fixed), RenderError> {
        let mut bounds: Option<Rect<f32>> = None;
        let mut caret = Fixed::ZERO;
        let mut prev = None;
        for c in text.chars() {
            if let Some(p) = prev {
                caret = caret + self.kerning(p, c);
            }
            let glyph = self.glyph(c);
            if let Some(bb) = glyph.exact_bounding_box() {
                let x = caret.to_f32();
                let (min_x, max_x) = (bb.min.x + x, bb.max.x + x);
                bounds = Some(match bounds {
                    None => Rect{min: point(min_x, bb.min.y),
                                 max: point(max_x, bb.max.y)},
                    Some(r) => Rect{
                        min: point(r.min.x.min(min_x), r.min.y.min(bb.min.y)),
                        max: point(r.max.x.max(max_x), r.max.y.max(bb.max.y)),
                    },
                });
            }
            caret = caret + self.advance_of(c, &glyph)?;
            prev = Some(c);
        }

        let bounds = bounds.map(|r| Bounds{
            min: point(Fixed::from_f32(r.min.x.floor()), Fixed::from_f32(r.min.y.floor())),
            max: point(Fixed::from_f32(r.max.x.ceil()), Fixed::from_f32(r.max.y.ceil())),
        }).unwrap_or_else(empty_bounds);
        Ok((bounds, caret))
    }

    fn kerning(&self, first: char, second: char) -> Fixed {
        let kern = self.typeface.font().pair_kerning(self.scale, first, second);
        if kern.is_finite() { Fixed::from_f32(kern) } else { Fixed::ZERO }
    }

    fn draw(&self, canvas: &mut Canvas, text: &str,
            origin: Point, color: Color) -> Result<Point, RenderError> {
        let mut dot = origin;
        let mut prev = None;
        for c in text.chars() {
            if let Some(p) = prev {
                dot.x = dot.x + self.kerning(p, c);
            }
            let glyph = self.glyph(c);
            let advance = self.advance_of(c, &glyph)?;

            let positioned = glyph.positioned(to_rusttype_point(dot));
            if let Some(bbox) = positioned.pixel_bounding_box() {
                positioned.draw(|x, y, v| {
                    paint(canvas, bbox.min.x + x as i32, bbox.min.y + y as i32, color, v);
                });
            }

            dot.x = dot.x + advance;
            prev = Some(c);
        }
        Ok(dot)
    }
}

impl<'t> Drop for ScaledFace<'t> {
    fn drop(&mut self) {
        trace!("Releasing face of size {}px with {} cached glyph(s)",
            self.size, self.glyphs.borrow().len());
    }
}

impl<'t> fmt::Debug for ScaledFace<'t> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ScaledFace")
            .field("typeface", self.typeface)
            .field("size", &self.size)
            .field("cached_glyphs", &self.cached_glyphs())
            .finish()
    }
}
