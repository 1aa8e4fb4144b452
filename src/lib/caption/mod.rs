//! Module implementing image captioning.

mod codec;
mod compositor;
mod engine;
mod error;
mod output;


pub use self::codec::{decode, encode, extensions, format_for_path, is_supported};
pub use self::compositor::Compositor;
pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Config,
                       ConfigError,
                       Engine};
pub use self::error::{CaptionError, RenderError};
pub use self::output::CaptionOutput;
