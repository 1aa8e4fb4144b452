//! Module responsible for measuring, laying out & rendering caption text.

mod canvas;
mod face;
mod layout;
mod outline;

#[cfg(test)]
pub(crate) mod testing;


pub use self::canvas::{Canvas, paint};
pub use self::face::{Face, FaceFactory, ScaledFace};
pub use self::layout::{center, measure_glyph};
pub use self::outline::{OutlineRenderer, OutlineStyle};
pub(crate) use self::face::check_size;
