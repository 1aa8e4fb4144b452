//! Parsing & deserialization of caption colors.

use std::error;
use std::fmt;
use std::str::FromStr;

use css_color_parser::Color as CssColor;
use serde::de::{self, Deserialize, Visitor};

use super::super::Color;


const CHANNELS: &'static [&'static str] = &["r", "g", "b"];
const EXPECTING_MSG: &'static str = "CSS color string or array/map of RGB values";


impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        let expected = &"3" as &dyn de::Expected;
        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, expected))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(CHANNELS.len() + 1, expected));
        }
        Ok(Color(channels[0], channels[1], channels[2]))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let mut channels: [Option<u8>; 3] = [None; 3];
        while let Some(key) = map.next_key::<String>()? {
            let index = match key.trim().to_lowercase().as_str() {
                "r" | "red" => 0,
                "g" | "green" => 1,
                "b" | "blue" => 2,
                other => return Err(de::Error::unknown_field(other, CHANNELS)),
            };
            if channels[index].is_some() {
                return Err(de::Error::duplicate_field(CHANNELS[index]));
            }
            channels[index] = Some(map.next_value()?);
        }

        let mut result = [0u8; 3];
        for (i, channel) in channels.iter().enumerate() {
            result[i] = channel.ok_or_else(|| de::Error::missing_field(CHANNELS[i]))?;
        }
        Ok(Color(result[0], result[1], result[2]))
    }
}


impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse a color from a CSS color string.
    ///
    /// Apart from the `#` prefix, 24-bit hex colors may also use `0x`.
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let mut s = v.trim().to_lowercase();
        if s.starts_with("0x") {
            if s.len() != 8 {
                return Err(ColorParseError::Syntax(v.to_owned()));
            }
            s = format!("#{}", &s[2..]);
        }

        let css_color: CssColor = s.parse()
            .map_err(|_| ColorParseError::Syntax(v.to_owned()))?;
        if css_color.a != 1.0 {
            return Err(ColorParseError::Alpha(css_color.a));
        }
        Ok(Color(css_color.r, css_color.g, css_color.b))
    }
}


/// Error that may occur while parsing a `Color`.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorParseError {
    /// The string is not a valid CSS color.
    Syntax(String),
    /// The color includes an alpha channel, which captions don't support.
    Alpha(f32),
}

impl error::Error for ColorParseError {
    fn description(&self) -> &str { "color parse error" }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorParseError::Syntax(ref s) => write!(fmt, "invalid CSS color syntax: `{}`", s),
            ColorParseError::Alpha(a) => write!(fmt, "color transparency not supported (alpha={})", a),
        }
    }
}
