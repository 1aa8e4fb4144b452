//! Module for loading the fonts that captions are rendered with.

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use rusttype::{self, GlyphId, Scale};

use super::Loader;
use super::filesystem::{BytesLoader, FileLoader};


/// File extensions of the font files, in order of preference.
pub const FILE_EXTENSIONS: &'static [&'static str] = &["ttf", "otf"];

/// Name of the font compiled into the library.
///
/// It is used when no font file of this name exists in the font directory.
pub const BUNDLED_FONT: &'static str = "DejaVuSans-Bold";
const BUNDLED_FONT_DATA: &'static [u8] =
    include_bytes!("../../../data/fonts/DejaVuSans-Bold.ttf");


/// Parsed outline font program, independent of any particular size.
///
/// Typefaces are immutable and meant to be shared (through an `Arc`)
/// by all the faces derived from them.
pub struct Typeface(rusttype::Font<'static>);

impl Typeface {
    /// Parse the typeface from the raw bytes of a TrueType/OpenType font file.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        if bytes.is_empty() {
            return Err(FontError::Empty);
        }
        let font = rusttype::Font::try_from_vec(bytes).ok_or(FontError::Malformed)?;
        if font.glyph_count() == 0 {
            return Err(FontError::Malformed);
        }
        Ok(Typeface(font))
    }

    /// The typeface compiled into the library (see `BUNDLED_FONT`).
    #[inline]
    pub fn bundled() -> Result<Self, FontError> {
        Typeface::from_bytes(BUNDLED_FONT_DATA.to_vec())
    }

    /// The underlying rusttype font.
    #[inline]
    pub fn font(&self) -> &rusttype::Font<'static> {
        &self.0
    }

    /// Scale at which the font's em square is `size` pixels tall.
    ///
    /// rusttype's own `Scale` measures the ascent-to-descent height instead.
    pub fn em_scale(&self, size: f32) -> Scale {
        let units_per_em = self.0.units_per_em() as f32;
        let v_metrics = self.0.v_metrics_unscaled();
        let height = v_metrics.ascent - v_metrics.descent;
        if units_per_em <= 0.0 || height <= 0.0 {
            return Scale::uniform(size);
        }
        Scale::uniform(size * height / units_per_em)
    }

    /// Check if the typeface has glyphs for all characters of given text.
    /// Returns the characters that are missing.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let mut seen = HashSet::new();
        text.chars()
            .filter(|c| !c.is_whitespace())
            .filter(|c| seen.insert(*c))
            .filter(|&c| self.0.glyph(c).id() == GlyphId(0))
            .collect()
    }
}

impl fmt::Debug for Typeface {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Typeface({} glyphs)", self.0.glyph_count())
    }
}


/// Loader of typefaces from font files in a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                FileLoader::for_extensions(directory, FILE_EXTENSIONS.iter()))
        }
    }
}

impl Loader for FontLoader {
    type Item = Typeface;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Typeface, Self::Err> {
        let bytes = match self.inner.load(name) {
            Ok(bytes) => bytes,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound && name == BUNDLED_FONT => {
                debug!("Font `{}` not found in {}, using the bundled copy",
                    name, self.inner.file_loader().directory().display());
                return Typeface::bundled();
            }
            Err(e) => {
                debug!("Cannot read font `{}` from {}: {}",
                    name, self.inner.file_loader().directory().display(), e);
                return Err(FontError::Io(e));
            }
        };
        let typeface = Typeface::from_bytes(bytes)?;
        debug!("Font `{}` loaded successfully: {:?}", name, typeface);
        Ok(typeface)
    }
}


/// Error that may occur while loading a typeface.
#[derive(Debug)]
pub enum FontError {
    /// The font file couldn't be read.
    Io(io::Error),
    /// Font data is empty.
    Empty,
    /// Font data couldn't be parsed as a single font.
    Malformed,
}

impl Error for FontError {
    fn description(&self) -> &str { "font loading error" }
    fn cause(&self) -> Option<&dyn Error> {
        match *self {
            FontError::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontError::Io(ref e) => write!(fmt, "cannot read font file: {}", e),
            FontError::Empty => write!(fmt, "font data is empty"),
            FontError::Malformed => write!(fmt, "font data is malformed"),
        }
    }
}
