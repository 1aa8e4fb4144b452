//! Module implementing the layout of single-line captions.

use rusttype::point;

use caption::RenderError;
use model::{Bounds, Fixed, Point};
use super::face::Face;


/// Compute the drawing origin (pen position on the baseline) for given text,
/// so that it appears centered around the anchor point.
///
/// Horizontally, half of the text's advance is put on either side of the anchor.
/// Vertically, the baseline is moved down by half of the text's visual height,
/// as glyph extents are measured upwards from the baseline.
///
/// Empty text doesn't move anything, so its origin is the anchor itself.
pub fn center(face: &dyn Face, text: &str, anchor: Point) -> Result<Point, RenderError> {
    let (bounds, advance) = face.measure(text)?;
    let height = bounds.max.y - bounds.min.y;
    let origin = point(anchor.x - advance / 2, anchor.y + height / 2);
    trace!("Centered {:?} ({}px wide, {}px tall) around ({}, {}) at ({}, {})",
        text, advance, height, anchor.x, anchor.y, origin.x, origin.y);
    Ok(origin)
}


/// Measure a single character.
pub fn measure_glyph(face: &dyn Face, c: char) -> Result<(Bounds, Fixed), RenderError> {
    let mut buf = [0; 4];
    face.measure(c.encode_utf8(&mut buf))
}
