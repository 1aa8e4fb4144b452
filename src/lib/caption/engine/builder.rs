//! Module implementing the builder for `Engine`.

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;

use model::{Color, OutlineStrategy};
use model::constants::DEFAULT_FONT;
use resources::{CachingLoader, FontError, FontLoader, Loader, Typeface};
use super::config::{Config, Error as ConfigError};
use super::{Engine, Inner};


pub(super) const DEFAULT_FONT_CAPACITY: usize = 16;


/// Builder for `Engine`.
#[derive(Debug)]
#[must_use = "unused builder which must be used"]
pub struct Builder<Fl = FontLoader>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    errors: Vec<Error>,
    font_loader: Option<Fl>,
    font: String,
    font_cache_size: usize,
    config: Config,
}

impl Builder<FontLoader> {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }

    /// Set the directory where the fonts will be loaded from.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.font_loader = Some(FontLoader::new(directory)); self
    }
}
impl Default for Builder<FontLoader> {
    fn default() -> Self {
        Builder{
            errors: vec![],
            font_loader: None,
            font: DEFAULT_FONT.to_owned(),
            font_cache_size: DEFAULT_FONT_CAPACITY,
            config: Config::default(),
        }
    }
}

// Setters.
impl<Fl> Builder<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Set a custom loader for fonts.
    ///
    /// Fonts loaded by it will still be cached in an LRU cache.
    #[inline]
    pub fn font_loader<L>(self, loader: L) -> Builder<L>
        where L: Loader<Item=Typeface, Err=FontError>
    {
        Builder{
            errors: self.errors,
            font_loader: Some(loader),
            font: self.font,
            font_cache_size: self.font_cache_size,
            config: self.config,
        }
    }

    /// Set the name of the font used for captions.
    #[inline]
    pub fn font<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        if name.is_empty() {
            return self.err(Error::EmptyFontName);
        }
        self.font = name; self
    }

    /// Change the size of the font cache.
    #[inline]
    pub fn font_cache_size(mut self, size: usize) -> Self {
        if size == 0 {
            return self.err(Error::ZeroCacheSize);
        }
        self.font_cache_size = size; self
    }

    /// Replace the whole configuration.
    #[inline]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config; self
    }

    #[inline]
    pub fn size_divisor(mut self, divisor: f32) -> Self {
        self.config.size_divisor = divisor; self
    }

    #[inline]
    pub fn outline_strategy(mut self, strategy: OutlineStrategy) -> Self {
        self.config.outline_strategy = strategy; self
    }

    #[inline]
    pub fn outline_thickness(mut self, thickness: f32) -> Self {
        self.config.outline_thickness = thickness; self
    }

    #[inline]
    pub fn outline_proportion(mut self, proportion: f32) -> Self {
        self.config.outline_proportion = proportion; self
    }

    #[inline]
    pub fn edge_margin(mut self, margin: u32) -> Self {
        self.config.edge_margin = margin; self
    }

    #[inline]
    pub fn outline_color(mut self, color: Color) -> Self {
        self.config.outline_color = color; self
    }

    #[inline]
    pub fn fill_color(mut self, color: Color) -> Self {
        self.config.fill_color = color; self
    }

    /// Set the quality percentage of JPEG images generated by the `Engine`.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality; self
    }
}

// Validation & building.
impl<Fl> Builder<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine<Fl>, Error> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        self.config.validate().map_err(Error::Config)?;

        let font_loader = self.font_loader.ok_or(Error::NoLoader)?;
        let font_loader = CachingLoader::new(font_loader, self.font_cache_size);
        Ok(Engine::from(Inner::new(self.config, self.font, font_loader)))
    }

    #[doc(hidden)]
    fn err(mut self, error: Error) -> Self {
        self.errors.push(error); self
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// No font loader set up.
    NoLoader,
    /// Font name was empty.
    EmptyFontName,
    /// Font cache was requested to hold no fonts.
    ZeroCacheSize,
    /// Configuration value is out of range.
    Config(ConfigError),
}

impl StdError for Error {
    fn description(&self) -> &str { "engine configuration error" }
    fn cause(&self) -> Option<&dyn StdError> {
        match *self {
            Error::Config(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoLoader => write!(fmt, "no font loader configured"),
            Error::EmptyFontName => write!(fmt, "font name cannot be empty"),
            Error::ZeroCacheSize => write!(fmt, "font cache size must be positive"),
            Error::Config(ref e) => write!(fmt, "invalid configuration: {}", e),
        }
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use model::{Color, OutlineStrategy};
    use resources::{FontError, Loader, Typeface};
    use super::super::config::Error as ConfigError;
    use super::{Builder, Error};

    struct NoFonts;
    impl Loader for NoFonts {
        type Item = Typeface;
        type Err = FontError;
        fn load<'n>(&self, _: &'n str) -> Result<Typeface, FontError> {
            Err(FontError::Empty)
        }
    }

    #[test]
    fn requires_loader() {
        assert_that!(Builder::new().build()).is_err().is_equal_to(Error::NoLoader);
    }

    #[test]
    fn directory() {
        let engine = Builder::new().font_directory("/tmp").build().unwrap();
        assert_eq!("Impact", engine.font_name());
    }

    #[test]
    fn custom_loader_and_settings() {
        let engine = Builder::new()
            .font_loader(NoFonts)
            .font("Anton")
            .font_cache_size(2)
            .outline_strategy(OutlineStrategy::SizeDifferentialShadow)
            .outline_proportion(0.2)
            .fill_color(Color(0xff, 0xff, 0))
            .edge_margin(0)
            .jpeg_quality(85)
            .build().unwrap();
        assert_eq!("Anton", engine.font_name());
        let config = engine.config();
        assert_eq!(OutlineStrategy::SizeDifferentialShadow, config.outline_strategy);
        assert_eq!(0.2, config.outline_proportion);
        assert_eq!(Color(0xff, 0xff, 0), config.fill_color);
        assert_eq!(0, config.edge_margin);
        assert_eq!(85, config.jpeg_quality);
    }

    #[test]
    fn invalid_settings() {
        assert_that!(Builder::new().font_directory(".").font("").build())
            .is_err().is_equal_to(Error::EmptyFontName);
        assert_that!(Builder::new().font_directory(".").font_cache_size(0).build())
            .is_err().is_equal_to(Error::ZeroCacheSize);
        assert_that!(Builder::new().font_directory(".").jpeg_quality(0).build())
            .is_err().is_equal_to(Error::Config(ConfigError::JpegQuality(0)));
        assert_that!(Builder::new().font_directory(".").size_divisor(-1.0).build())
            .is_err().is_equal_to(Error::Config(ConfigError::SizeDivisor(-1.0)));
    }
}
