use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use crate::ConfigError;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Piecewise hue to RGB conversion at full saturation and lightness 0.5.
    pub fn from_hue(hue: f64) -> Rgb {
        let channel = |n: f64| {
            let k = (n + hue / 60.0).rem_euclid(6.0);
            let level = 1.0 - k.min(4.0 - k).min(1.0).max(0.0);

            (255.0 * level).round() as u8
        };

        Rgb(channel(5.0), channel(3.0), channel(1.0))
    }

    pub fn rgba(&self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, opacity)
    }

    pub fn parse(css: &str) -> Result<Rgb, ConfigError> {
        let css = css.trim();
        let invalid = || ConfigError::InvalidColor(css.to_string());

        if let Some(hex) = css.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }

            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

            return Ok(Rgb(byte(0)?, byte(2)?, byte(4)?));
        }

        let inner = css
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let channels = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>, ConfigError>>()?;

        match channels.as_slice() {
            [r, g, b] => Ok(Rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse(s)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let css = String::deserialize(deserializer)?;

        Rgb::parse(&css).map_err(serde::de::Error::custom)
    }
}
