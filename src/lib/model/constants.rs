//! Module defining constants relevant to the data model.

use super::types::{Color, OutlineStrategy};


/// Name of the default font.
pub const DEFAULT_FONT: &'static str = "Impact";

/// Default color of the caption text.
pub const DEFAULT_FILL_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Default color of the text outline.
/// This should be the inversion of DEFAULT_FILL_COLOR.
pub const DEFAULT_OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);

/// Default technique of drawing the text outline.
pub const DEFAULT_OUTLINE_STRATEGY: OutlineStrategy = OutlineStrategy::DualFace;

/// Default ratio of image height to caption font size.
pub const DEFAULT_SIZE_DIVISOR: f32 = 16.0;
/// Ratio of image height to caption font size
/// that works best with the eight-direction stamped outline.
pub const STAMP_SIZE_DIVISOR: f32 = 10.0;

/// Default offset (in pixels) of the outline stamps.
pub const DEFAULT_OUTLINE_THICKNESS: f32 = 2.0;
/// Default difference between outline & fill font sizes,
/// as a fraction of the caption font size.
pub const DEFAULT_OUTLINE_PROPORTION: f32 = 0.10;

/// Default distance (in pixels) of the captions from top & bottom edges.
pub const DEFAULT_EDGE_MARGIN: u32 = 10;

/// Default quality of the generated JPEG images (in %).
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Largest outline thickness & edge margin (in pixels).
/// Caption coordinates built from these must stay within the 26.6 fixed-point range.
pub const MAX_PIXEL_OFFSET: u32 = (::std::i32::MAX >> 7) as u32;
