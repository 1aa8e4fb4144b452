//! Deterministic faces for testing text layout & rendering without font files.

use std::cell::RefCell;
use std::rc::Rc;

use rusttype::point;

use caption::{CaptionError, RenderError};
use model::{Bounds, Color, Fixed, Point};
use model::types::fixed::empty_bounds;
use super::canvas::{Canvas, paint};
use super::face::{Face, FaceFactory, check_size};


/// A single `Face::draw` call, as recorded by `BoxFace`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub size: f32,
    pub text: String,
    pub origin: Point,
    pub color: Color,
}

pub type DrawLog = Rc<RefCell<Vec<DrawCall>>>;


/// Face where every non-whitespace glyph is a solid square of the face's size,
/// sitting on the baseline. Every glyph (including spaces) advances by that size.
pub struct BoxFace {
    size: Fixed,
    log: DrawLog,
    fail_on: Option<String>,
}

impl BoxFace {
    pub fn new(size: i32) -> Self {
        BoxFace::with_log(Fixed::from_int(size), Rc::default(), None)
    }

    fn with_log(size: Fixed, log: DrawLog, fail_on: Option<String>) -> Self {
        BoxFace{size, log, fail_on}
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().clone()
    }
}

impl Face for BoxFace {
    fn size(&self) -> f32 {
        self.size.to_f32()
    }

    fn measure(&self, text: &str) -> Result<(Bounds, Fixed), RenderError> {
        let mut bounds: Option<Bounds> = None;
        let mut caret = Fixed::ZERO;
        for c in text.chars() {
            if !c.is_whitespace() {
                let min = point(caret, -self.size);
                let max = point(caret + self.size, Fixed::ZERO);
                bounds = Some(match bounds {
                    None => Bounds{min, max},
                    Some(b) => Bounds{min: point(b.min.x, b.min.y), max: point(max.x, b.max.y)},
                });
            }
            caret = caret + self.size;
        }
        Ok((bounds.unwrap_or_else(empty_bounds), caret))
    }

    fn draw(&self, canvas: &mut Canvas, text: &str,
            origin: Point, color: Color) -> Result<Point, RenderError> {
        if self.fail_on.as_ref().map(|f| f == text).unwrap_or(false) {
            return Err(RenderError::Draw(format!("cannot draw {:?}", text)));
        }
        self.log.borrow_mut().push(DrawCall{
            size: self.size(), text: text.to_owned(), origin, color,
        });

        let size = self.size.round();
        let mut dot = origin;
        for c in text.chars() {
            if !c.is_whitespace() {
                let (left, baseline) = (dot.x.round(), dot.y.round());
                for y in (baseline - size)..baseline {
                    for x in left..(left + size) {
                        paint(canvas, x, y, color, 1.0);
                    }
                }
            }
            dot.x = dot.x + self.size;
        }
        Ok(dot)
    }
}


/// Factory of `BoxFace`s which share a single log of draw calls.
#[derive(Default)]
pub struct BoxFactory {
    log: DrawLog,
    sizes: RefCell<Vec<f32>>,
    fail_on: Option<String>,
}

impl BoxFactory {
    pub fn new() -> Self {
        BoxFactory::default()
    }

    /// Create a factory whose faces fail to draw given text.
    pub fn failing_on<S: Into<String>>(text: S) -> Self {
        BoxFactory{fail_on: Some(text.into()), ..BoxFactory::default()}
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().clone()
    }

    /// Sizes of all the faces created so far.
    pub fn sizes(&self) -> Vec<f32> {
        self.sizes.borrow().clone()
    }
}

impl FaceFactory for BoxFactory {
    fn make_face<'f>(&'f self, size: f32) -> Result<Box<dyn Face + 'f>, CaptionError> {
        let size = check_size(size)?;
        self.sizes.borrow_mut().push(size);
        Ok(Box::new(BoxFace::with_log(
            Fixed::from_f32(size), self.log.clone(), self.fail_on.clone())))
    }
}
