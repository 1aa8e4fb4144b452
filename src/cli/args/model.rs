//! Data structures for command-line arguments.

use std::error::Error;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use clap;
use impacc::{Color, ColorParseError, Config, OutlineStrategy, UnknownStrategy};


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// Path to the image that should be captioned.
    ///
    /// If absent, it shall be read from standard input.
    pub input_path: Option<PathBuf>,
    /// Path to write the captioned image to.
    ///
    /// If absent, it shall be written to standard output.
    pub output_path: Option<PathBuf>,

    /// Text at the top of the image.
    pub top: String,
    /// Text at the bottom of the image.
    pub bottom: String,

    /// Name of the font to use.
    pub font: Option<String>,
    /// Directory to load the font from.
    pub font_directory: Option<PathBuf>,

    /// JSON file with the captioning configuration.
    pub config_path: Option<PathBuf>,
    /// Configuration values given directly as flags.
    pub overrides: ConfigOverrides,
}


/// Captioning configuration given through command line flags.
/// These take precedence over the --config file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub outline_strategy: Option<OutlineStrategy>,
    pub size_divisor: Option<f32>,
    pub outline_thickness: Option<f32>,
    pub edge_margin: Option<u32>,
    pub fill_color: Option<Color>,
    pub outline_color: Option<Color>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of given base configuration.
    ///
    /// Choosing an outline strategy without an explicit size divisor
    /// picks the divisor that suits that strategy, unless the base
    /// already has a non-default one.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(strategy) = self.outline_strategy {
            if config.size_divisor == Config::default().size_divisor {
                config.size_divisor = Config::for_strategy(strategy).size_divisor;
            }
            config.outline_strategy = strategy;
        }
        if let Some(divisor) = self.size_divisor {
            config.size_divisor = divisor;
        }
        if let Some(thickness) = self.outline_thickness {
            config.outline_thickness = thickness;
        }
        if let Some(margin) = self.edge_margin {
            config.edge_margin = margin;
        }
        if let Some(color) = self.fill_color {
            config.fill_color = color;
        }
        if let Some(color) = self.outline_color {
            config.outline_color = color;
        }
        config
    }
}


macro_attr! {
    /// Error that can occur while parsing of command line arguments.
    #[derive(Debug, EnumFromInner!)]
    pub enum ArgsError {
        /// General when parsing the arguments.
        Parse(clap::Error),
        /// Invalid --outline strategy name.
        Strategy(UnknownStrategy),
        /// Invalid color value.
        Color(ColorParseError),
        /// Invalid fractional number.
        Float(ParseFloatError),
        /// Invalid whole number.
        Int(ParseIntError),
    }
}

impl Error for ArgsError {
    fn description(&self) -> &str { "command line argument error" }
    fn cause(&self) -> Option<&dyn Error> {
        match *self {
            ArgsError::Parse(ref e) => Some(e),
            ArgsError::Strategy(ref e) => Some(e),
            ArgsError::Color(ref e) => Some(e),
            ArgsError::Float(ref e) => Some(e),
            ArgsError::Int(ref e) => Some(e),
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgsError::Parse(ref e) => write!(fmt, "invalid arguments: {}", e),
            ArgsError::Strategy(ref e) => write!(fmt, "invalid outline strategy: {}", e),
            ArgsError::Color(ref e) => write!(fmt, "invalid color: {}", e),
            ArgsError::Float(ref e) => write!(fmt, "invalid number: {}", e),
            ArgsError::Int(ref e) => write!(fmt, "invalid whole number: {}", e),
        }
    }
}


#[cfg(test)]
mod tests {
    use impacc::{Color, Config, OutlineStrategy};
    use super::ConfigOverrides;

    #[test]
    fn no_overrides() {
        let config = Config{edge_margin: 3, ..Config::default()};
        assert_eq!(config, ConfigOverrides::default().apply(config));
    }

    #[test]
    fn strategy_picks_its_divisor() {
        let overrides = ConfigOverrides{
            outline_strategy: Some(OutlineStrategy::EightDirectionStamp),
            ..ConfigOverrides::default()
        };
        let config = overrides.apply(Config::default());
        assert_eq!(OutlineStrategy::EightDirectionStamp, config.outline_strategy);
        assert_eq!(10.0, config.size_divisor);

        // ...but not when the divisor was changed already.
        let config = overrides.apply(Config{size_divisor: 12.0, ..Config::default()});
        assert_eq!(12.0, config.size_divisor);
    }

    #[test]
    fn explicit_values_win() {
        let overrides = ConfigOverrides{
            outline_strategy: Some(OutlineStrategy::EightDirectionStamp),
            size_divisor: Some(8.0),
            outline_thickness: Some(3.5),
            edge_margin: Some(0),
            fill_color: Some(Color(0xff, 0xff, 0)),
            outline_color: Some(Color::white()),
        };
        let config = overrides.apply(Config::default());
        assert_eq!(8.0, config.size_divisor);
        assert_eq!(3.5, config.outline_thickness);
        assert_eq!(0, config.edge_margin);
        assert_eq!(Color(0xff, 0xff, 0), config.fill_color);
        assert_eq!(Color::white(), config.outline_color);
    }
}
