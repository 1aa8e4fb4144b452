//! Module which defines the captioning engine.

mod builder;
mod config;

pub use self::builder::Error as BuildError;
pub use self::config::{Config, Error as ConfigError};


use std::fmt;
use std::path::Path;
use std::sync::Arc;

use antidote::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use image::DynamicImage;

use model::constants::DEFAULT_FONT;
use resources::{CachingLoader, FontError, FontLoader, Loader, Typeface};
use text::Canvas;
use util::cache::ThreadSafeCache;
use super::codec;
use super::compositor::Compositor;
use super::error::CaptionError;
use super::output::CaptionOutput;
pub use self::builder::Builder;


/// Image captioning engine.
///
/// The engine is thread-safe (`Sync`), so it can be shared between
/// threads that caption different images.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
pub struct Engine<Fl = FontLoader>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    inner: Arc<Inner<Fl>>,
}

/// Shared state of the engine.
pub(super) struct Inner<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    config: RwLock<Config>,
    font: String,
    font_loader: CachingLoader<Fl>,
}

impl<Fl> Inner<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    #[inline]
    pub fn new(config: Config, font: String, font_loader: CachingLoader<Fl>) -> Self {
        let config = RwLock::new(config);
        Inner{config, font, font_loader}
    }
}

impl<Fl> From<Inner<Fl>> for Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    fn from(inner: Inner<Fl>) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

impl<Fl> Clone for Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    fn clone(&self) -> Self {
        Engine{inner: self.inner.clone()}
    }
}

impl<Fl> fmt::Debug for Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Engine")
            .field("config", &*self.inner.config.read())
            .field("font", &self.inner.font)
            .field("font_loader", &self.inner.font_loader)
            .finish()
    }
}

// Constructors.
impl Engine<FontLoader> {
    /// Create an Engine which loads the default font from given directory
    /// and uses the default configuration.
    ///
    /// The font will be cached in memory once loaded.
    /// For other ways of creating `Engine`, see the `EngineBuilder`.
    #[inline]
    pub fn new<D: AsRef<Path>>(font_directory: D) -> Self {
        Engine::with_loader(FontLoader::new(font_directory))
    }
}
impl<Fl> Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Create an Engine that uses given font loader and the default configuration.
    #[inline]
    pub fn with_loader(font_loader: Fl) -> Self {
        let font_loader = CachingLoader::new(font_loader, builder::DEFAULT_FONT_CAPACITY);
        Engine::from(Inner::new(Config::default(), DEFAULT_FONT.to_owned(), font_loader))
    }
}

// Captioning.
impl<Fl> Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Caption a decoded image with top & bottom text.
    ///
    /// Returns a new RGBA image of the same dimensions; the source is left intact.
    /// Either text may be empty, in which case that caption is skipped.
    pub fn caption(&self, image: &DynamicImage,
                   top: &str, bottom: &str) -> Result<Canvas, CaptionError> {
        let config = *self.inner.config.read();
        let typeface = self.load_font()?;
        Compositor::new(&*typeface, config).render(image, top, bottom)
    }

    /// Caption an encoded GIF, JPEG or PNG image
    /// and encode the result in the same format.
    pub fn caption_bytes(&self, bytes: &[u8],
                         top: &str, bottom: &str) -> Result<CaptionOutput, CaptionError> {
        let (image, format) = codec::decode(bytes)?;
        debug!("Source image decoded as {:?}", format);

        let jpeg_quality = self.inner.config.read().jpeg_quality;
        let canvas = self.caption(&image, top, bottom)?;
        let bytes = codec::encode(canvas, format, jpeg_quality)?;
        Ok(CaptionOutput::new(format, bytes))
    }

    fn load_font(&self) -> Result<Arc<Typeface>, CaptionError> {
        let name = &self.inner.font;
        trace!("Loading font `{}`...", name);
        self.inner.font_loader.load(name)
            .map_err(|e| CaptionError::Font(name.clone(), e))
    }
}

// Managing resources.
impl<Fl> Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Name of the font used for captions.
    #[inline]
    pub fn font_name(&self) -> &str {
        &self.inner.font
    }

    /// Preemptively load the caption font into engine's cache.
    pub fn preload_font(&self) -> Result<(), CaptionError> {
        self.load_font().map(|_| ())
    }

    /// Return a reference to the internal font cache.
    /// This can be used to examine cache statistics (hits & misses).
    #[inline]
    pub fn font_cache(&self) -> &ThreadSafeCache<String, Typeface> {
        self.inner.font_loader.cache()
    }
}

// Configuration.
impl<Fl> Engine<Fl>
    where Fl: Loader<Item=Typeface, Err=FontError>
{
    /// Read the `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> RwLockReadGuard<Config> {
        self.inner.config.read()
    }

    /// Modify the `Engine`'s configuration.
    ///
    /// Changes will affect future captioning calls.
    #[inline]
    pub fn config_mut(&self) -> RwLockWriteGuard<Config> {
        self.inner.config.write()
    }
}
