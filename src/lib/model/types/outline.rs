//! Module defining the outline strategy enum.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.

use std::error;
use std::fmt;
use std::str::FromStr;


macro_attr! {
    /// Technique used to make caption text legible over arbitrary backgrounds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
             Deserialize, IterVariants!(OutlineStrategies))]
    #[serde(rename_all = "kebab-case")]
    pub enum OutlineStrategy {
        /// Draw each glyph with a larger face in the outline color,
        /// then with a smaller face in the fill color on top of it.
        DualFace,
        /// Stamp each glyph in the outline color at eight offsets around it,
        /// then draw the fill color at its true position.
        EightDirectionStamp,
        /// Draw only the fill color, using a face slightly smaller
        /// than the one used for layout.
        SizeDifferentialShadow,
    }
}

impl OutlineStrategy {
    /// Name of the strategy, as accepted by `FromStr` and serde.
    pub fn name(&self) -> &'static str {
        match *self {
            OutlineStrategy::DualFace => "dual-face",
            OutlineStrategy::EightDirectionStamp => "eight-direction-stamp",
            OutlineStrategy::SizeDifferentialShadow => "size-differential-shadow",
        }
    }

    /// Names of all the strategies.
    pub fn names() -> Vec<&'static str> {
        OutlineStrategy::iter_variants().map(|s| s.name()).collect()
    }
}

impl Default for OutlineStrategy {
    fn default() -> Self {
        OutlineStrategy::DualFace
    }
}

impl fmt::Display for OutlineStrategy {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.name())
    }
}

impl FromStr for OutlineStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('_', "-");
        OutlineStrategy::iter_variants()
            .find(|v| v.name() == name)
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}


/// Error for an unrecognized outline strategy name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl error::Error for UnknownStrategy {
    fn description(&self) -> &str { "unknown outline strategy" }
}

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "unknown outline strategy `{}` (expected one of: {})",
            self.0, OutlineStrategy::names().join(", "))
    }
}
