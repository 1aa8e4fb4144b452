//!
//! impacc  -- Impact font meme captions
//!

             extern crate antidote;
             extern crate css_color_parser;
#[macro_use] extern crate enum_derive;
             extern crate image;
#[macro_use] extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
             extern crate lru_cache;
#[macro_use] extern crate macro_attr;
#[macro_use] extern crate maplit;
#[macro_use] extern crate newtype_derive;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate unicode_normalization;


#[cfg(test)]              extern crate serde_json;
#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate spectral;


mod caption;
mod model;
mod resources;
mod text;
mod util;


pub use caption::*;
pub use model::*;
pub use resources::*;
pub use text::{center, measure_glyph, paint, Canvas, Face, FaceFactory,
               OutlineRenderer, OutlineStyle, ScaledFace};
pub use util::cache::*;
