//! Module implementing the `Caption` type.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use super::fixed::Point;


/// Describes a single line of text rendered on the image,
/// centered around its anchor point.
#[derive(Clone, PartialEq, Eq)]
pub struct Caption {
    /// Text to render, already in its display form (uppercased).
    pub text: String,
    /// Point that the text is centered around.
    pub anchor: Point,
}

impl Caption {
    /// Create a caption for given text.
    ///
    /// The text is normalized and uppercased, as all captions are rendered in capitals.
    #[inline]
    pub fn new<S: AsRef<str>>(text: S, anchor: Point) -> Self {
        Caption{text: display_text(text.as_ref()), anchor}
    }

    /// Whether there is anything to render.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Debug for Caption {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Caption@({}, {})({:?})", self.anchor.x, self.anchor.y, self.text)
    }
}


/// Convert caption text into the form it is displayed in.
fn display_text(s: &str) -> String {
    s.nfc().collect::<String>().to_uppercase()
}
