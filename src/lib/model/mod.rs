//! Module defining the data model.

pub mod constants;
mod de;
pub(crate) mod types;

pub use self::de::ColorParseError;
pub use self::types::*;
