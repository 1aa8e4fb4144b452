//! Captioning error.

use std::error::Error;
use std::fmt;

use image::{ImageError, ImageFormat};

use resources::FontError;


/// Error that may occur during the captioning.
pub enum CaptionError {
    /// The font couldn't be loaded.
    Font(String, FontError),
    /// Computed font size was not a positive number of pixels.
    InvalidSize(f32),
    /// Measuring or drawing the caption text failed.
    Render(RenderError),
    /// The source image couldn't be decoded.
    Decode(ImageError),
    /// The final image couldn't be encoded.
    Encode(ImageError),
    /// The image is in a format that captions cannot be written back to.
    UnsupportedFormat(ImageFormat),
}

impl From<RenderError> for CaptionError {
    fn from(input: RenderError) -> Self {
        CaptionError::Render(input)
    }
}

impl Error for CaptionError {
    fn description(&self) -> &str { "captioning error" }
    fn cause(&self) -> Option<&dyn Error> {
        match *self {
            CaptionError::Font(_, ref e) => Some(e),
            CaptionError::Render(ref e) => Some(e),
            CaptionError::Decode(ref e) => Some(e),
            CaptionError::Encode(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Debug for CaptionError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionError::Font(ref f, ref e) => write!(fmt, "CaptionError::Font({:?}, {:?})", f, e),
            CaptionError::InvalidSize(s) => write!(fmt, "CaptionError::InvalidSize({:?})", s),
            CaptionError::Render(ref e) => write!(fmt, "CaptionError::Render({:?})", e),
            CaptionError::Decode(ref e) => write!(fmt, "CaptionError::Decode({:?})", e),
            CaptionError::Encode(ref e) => write!(fmt, "CaptionError::Encode({:?})", e),
            CaptionError::UnsupportedFormat(f) =>
                write!(fmt, "CaptionError::UnsupportedFormat({:?})", f),
        }
    }
}

impl fmt::Display for CaptionError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionError::Font(ref f, ref e) => write!(fmt, "cannot load font `{}`: {}", f, e),
            CaptionError::InvalidSize(s) => write!(fmt, "invalid font size: {}px", s),
            CaptionError::Render(ref e) => write!(fmt, "failed to render the caption: {}", e),
            CaptionError::Decode(ref e) => write!(fmt, "failed to decode the source image: {}", e),
            CaptionError::Encode(ref e) => write!(fmt, "failed to encode the final image: {}", e),
            CaptionError::UnsupportedFormat(f) => write!(fmt, "unsupported image format: {:?}", f),
        }
    }
}


/// Error while measuring or drawing text with a face.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderError {
    /// Glyph metrics for given character are unusable.
    Metrics(char),
    /// Drawing the text failed.
    Draw(String),
}

impl Error for RenderError {
    fn description(&self) -> &str { "text rendering error" }
}

impl fmt::Display for RenderError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RenderError::Metrics(c) => write!(fmt, "invalid metrics of glyph {:?}", c),
            RenderError::Draw(ref msg) => write!(fmt, "{}", msg),
        }
    }
}
