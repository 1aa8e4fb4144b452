//! Module with captioning engine configuration.

use std::error::Error as StdError;
use std::fmt;

use model::{Color, OutlineStrategy};
use model::constants::{DEFAULT_EDGE_MARGIN, DEFAULT_FILL_COLOR, DEFAULT_JPEG_QUALITY,
                       DEFAULT_OUTLINE_COLOR, DEFAULT_OUTLINE_PROPORTION,
                       DEFAULT_OUTLINE_STRATEGY, DEFAULT_OUTLINE_THICKNESS,
                       DEFAULT_SIZE_DIVISOR, MAX_PIXEL_OFFSET, STAMP_SIZE_DIVISOR};


/// Structure holding configuration for the `Engine`.
///
/// Missing fields are filled with their defaults when deserializing.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Ratio of image height to the caption font size.
    pub size_divisor: f32,
    /// How to draw the outline around caption text.
    pub outline_strategy: OutlineStrategy,
    /// Offset of the outline stamps (in pixels).
    pub outline_thickness: f32,
    /// Difference between the outline & fill font sizes,
    /// as a fraction of the font size.
    pub outline_proportion: f32,
    /// Distance of the captions from top & bottom image edges (in pixels).
    pub edge_margin: u32,
    pub outline_color: Color,
    pub fill_color: Color,
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            size_divisor: DEFAULT_SIZE_DIVISOR,
            outline_strategy: DEFAULT_OUTLINE_STRATEGY,
            outline_thickness: DEFAULT_OUTLINE_THICKNESS,
            outline_proportion: DEFAULT_OUTLINE_PROPORTION,
            edge_margin: DEFAULT_EDGE_MARGIN,
            outline_color: DEFAULT_OUTLINE_COLOR,
            fill_color: DEFAULT_FILL_COLOR,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Default configuration tuned for given outline strategy.
    ///
    /// Stamped outlines look best with a larger font.
    pub fn for_strategy(strategy: OutlineStrategy) -> Self {
        let size_divisor = match strategy {
            OutlineStrategy::EightDirectionStamp => STAMP_SIZE_DIVISOR,
            _ => DEFAULT_SIZE_DIVISOR,
        };
        Config{outline_strategy: strategy, size_divisor, ..Config::default()}
    }

    /// Check that all the values are within their valid ranges.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.size_divisor.is_finite() && self.size_divisor > 0.0) {
            return Err(Error::SizeDivisor(self.size_divisor));
        }
        if !(self.outline_thickness >= 0.0 &&
             self.outline_thickness <= MAX_PIXEL_OFFSET as f32) {
            return Err(Error::OutlineThickness(self.outline_thickness));
        }
        if !(self.outline_proportion >= 0.0 && self.outline_proportion < 1.0) {
            return Err(Error::OutlineProportion(self.outline_proportion));
        }
        if self.edge_margin > MAX_PIXEL_OFFSET {
            return Err(Error::EdgeMargin(self.edge_margin));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(Error::JpegQuality(self.jpeg_quality));
        }
        Ok(())
    }
}


/// Error for a `Config` value that's out of range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    SizeDivisor(f32),
    OutlineThickness(f32),
    OutlineProportion(f32),
    EdgeMargin(u32),
    JpegQuality(u8),
}

impl StdError for Error {
    fn description(&self) -> &str { "invalid engine configuration" }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::SizeDivisor(v) =>
                write!(fmt, "size divisor must be a positive number (got {})", v),
            Error::OutlineThickness(v) =>
                write!(fmt, "outline thickness must be between 0 and {} pixels (got {})",
                    MAX_PIXEL_OFFSET, v),
            Error::OutlineProportion(v) =>
                write!(fmt, "outline proportion must be in the [0, 1) range (got {})", v),
            Error::EdgeMargin(v) =>
                write!(fmt, "edge margin must be at most {} pixels (got {})",
                    MAX_PIXEL_OFFSET, v),
            Error::JpegQuality(v) =>
                write!(fmt, "JPEG quality must be between 1 and 100 (got {})", v),
        }
    }
}
