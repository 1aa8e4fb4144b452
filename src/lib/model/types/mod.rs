//! Module defining the model types.

mod caption;
mod color;
pub(crate) mod fixed;
mod outline;

pub use self::caption::Caption;
pub use self::color::Color;
pub use self::fixed::{Bounds, Fixed, Point, pixel_point};
pub use self::outline::{OutlineStrategy, UnknownStrategy};
