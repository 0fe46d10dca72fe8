//! Raw color descriptions as supplied by callers and widgets.
//!
//! A [`ColorDescription`] is what an edit event carries before it has been
//! validated. It may hold out-of-range or non-finite numbers; those are
//! rejected or normalized later by the [`ColorConverter`].
//!
//! # Text syntax
//!
//! ```text
//! #rgb  #rgba  #rrggbb  #rrggbbaa      - hex (leading '#' optional)
//! rgb(255, 0, 0)  rgba(255, 0, 0, 0.5)
//! hsl(250, 50%, 20%)  hsla(250, 0.5, 0.2, 1)
//! hsv(120, 100%, 50%)  hsva(120, 1, 0.5, 50%)
//! red | rebeccapurple | transparent    - named colors
//! ```
//!
//! [`ColorConverter`]: crate::convert::ColorConverter

use std::fmt;
use std::str::FromStr;

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Which input form produced a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSource {
    /// Hex string.
    #[default]
    Hex,
    /// Red/green/blue components.
    Rgb,
    /// Hue/saturation/lightness components.
    Hsl,
    /// Hue/saturation/value components.
    Hsv,
    /// CSS color keyword.
    Named,
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorSource::Hex => "hex",
            ColorSource::Rgb => "rgb",
            ColorSource::Hsl => "hsl",
            ColorSource::Hsv => "hsv",
            ColorSource::Named => "named",
        };
        f.write_str(name)
    }
}

/// An unvalidated color description.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorDescription {
    /// Hex digits, with or without a leading `#`.
    Hex(String),
    /// Channels in 0-255, optional alpha in 0-1.
    Rgb {
        /// Red.
        r: f32,
        /// Green.
        g: f32,
        /// Blue.
        b: f32,
        /// Alpha.
        a: Option<f32>,
    },
    /// Hue in degrees, saturation and lightness in 0-1 (values above 1 are percent).
    Hsl {
        /// Hue.
        h: f32,
        /// Saturation.
        s: f32,
        /// Lightness.
        l: f32,
        /// Alpha.
        a: Option<f32>,
    },
    /// Hue in degrees, saturation and value in 0-1 (values above 1 are percent).
    Hsv {
        /// Hue.
        h: f32,
        /// Saturation.
        s: f32,
        /// Value.
        v: f32,
        /// Alpha.
        a: Option<f32>,
    },
    /// CSS color keyword such as `rebeccapurple` or `transparent`.
    Named(String),
}

impl ColorDescription {
    /// Hex description from any string-like value.
    pub fn hex(hex: impl Into<String>) -> Self {
        Self::Hex(hex.into())
    }

    /// Opaque RGB description.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::Rgb { r, g, b, a: None }
    }

    /// Opaque HSL description.
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::Hsl { h, s, l, a: None }
    }

    /// HSL description with alpha.
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self::Hsl { h, s, l, a: Some(a) }
    }

    /// Opaque HSV description.
    pub fn hsv(h: f32, s: f32, v: f32) -> Self {
        Self::Hsv { h, s, v, a: None }
    }

    /// Named color description.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The input form of this description.
    pub fn source(&self) -> ColorSource {
        match self {
            Self::Hex(_) => ColorSource::Hex,
            Self::Rgb { .. } => ColorSource::Rgb,
            Self::Hsl { .. } => ColorSource::Hsl,
            Self::Hsv { .. } => ColorSource::Hsv,
            Self::Named(_) => ColorSource::Named,
        }
    }
}

impl Default for ColorDescription {
    /// hsla(250, 50%, 20%, 1): the picker's starting color.
    fn default() -> Self {
        Self::hsla(250.0, 0.5, 0.2, 1.0)
    }
}

impl fmt::Display for ColorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(hex) if hex.starts_with('#') => f.write_str(hex),
            Self::Hex(hex) => write!(f, "#{hex}"),
            Self::Rgb { r, g, b, a: None } => write!(f, "rgb({r}, {g}, {b})"),
            Self::Rgb { r, g, b, a: Some(a) } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Self::Hsl { h, s, l, a: None } => write!(f, "hsl({h}, {s}, {l})"),
            Self::Hsl { h, s, l, a: Some(a) } => write!(f, "hsla({h}, {s}, {l}, {a})"),
            Self::Hsv { h, s, v, a: None } => write!(f, "hsv({h}, {s}, {v})"),
            Self::Hsv { h, s, v, a: Some(a) } => write!(f, "hsva({h}, {s}, {v}, {a})"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for ColorDescription {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(Error::InvalidColor("empty color string".to_string()));
        }

        if let Some((func, args)) = split_function(text) {
            return parse_function(&func, args, input);
        }

        if let Some(hex) = text.strip_prefix('#') {
            return decode_hex(hex)
                .map(|_| Self::Hex(text.to_string()))
                .ok_or_else(|| Error::InvalidColor(input.to_string()));
        }

        let lower = text.to_ascii_lowercase();
        if named_color(&lower).is_some() {
            return Ok(Self::Named(lower));
        }
        if decode_hex(text).is_some() {
            return Ok(Self::Hex(text.to_string()));
        }

        Err(Error::InvalidColor(input.to_string()))
    }
}

/// Splits `name(args)` into a lowercase name and the argument text.
fn split_function(text: &str) -> Option<(String, &str)> {
    let open = text.find('(')?;
    let args = text[open + 1..].strip_suffix(')')?;
    Some((text[..open].trim().to_ascii_lowercase(), args))
}

fn parse_function(func: &str, args: &str, input: &str) -> Result<ColorDescription> {
    let invalid = || Error::InvalidColor(input.to_string());

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let (channels, alpha) = match (func, parts.len()) {
        ("rgb" | "hsl" | "hsv", 3) => (&parts[..3], None),
        ("rgba" | "hsla" | "hsva", 4) => (&parts[..3], Some(parts[3])),
        _ => return Err(invalid()),
    };

    let a = match alpha {
        Some(token) => Some(parse_component(token, 1.0).ok_or_else(invalid)?),
        None => None,
    };
    // Percent channels are scaled against the channel's own range.
    let scale = if func.starts_with("rgb") { 255.0 } else { 1.0 };
    let first = if func.starts_with("rgb") {
        parse_component(channels[0], scale)
    } else {
        parse_hue(channels[0])
    }
    .ok_or_else(invalid)?;
    let second = parse_component(channels[1], scale).ok_or_else(invalid)?;
    let third = parse_component(channels[2], scale).ok_or_else(invalid)?;

    Ok(match &func[..3] {
        "rgb" => ColorDescription::Rgb { r: first, g: second, b: third, a },
        "hsl" => ColorDescription::Hsl { h: first, s: second, l: third, a },
        _ => ColorDescription::Hsv { h: first, s: second, v: third, a },
    })
}

/// Parses a plain number, or a percentage scaled to `full`.
fn parse_component(token: &str, full: f32) -> Option<f32> {
    match token.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok().map(|p| p / 100.0 * full),
        None => token.parse::<f32>().ok(),
    }
}

fn parse_hue(token: &str) -> Option<f32> {
    token.strip_suffix("deg").unwrap_or(token).trim().parse::<f32>().ok()
}

/// Decodes 3, 4, 6 or 8 hex digits (no leading `#`).
pub(crate) fn decode_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();

    match hex.len() {
        3 | 4 => {
            let nibble = |i| digit(i, 1).map(|n| n * 17);
            let a = if hex.len() == 4 { nibble(3)? } else { 255 };
            Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, a))
        }
        6 | 8 => {
            let byte = |i| digit(i, 2);
            let a = if hex.len() == 8 { byte(6)? } else { 255 };
            Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, a))
        }
        _ => None,
    }
}

/// Looks up a lowercase CSS color keyword.
pub(crate) fn named_color(name: &str) -> Option<Rgba> {
    let rgba = match name {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::RED,
        "lime" => Rgba::GREEN,
        "blue" => Rgba::BLUE,
        "green" => Rgba::rgb(0, 128, 0),
        "yellow" => Rgba::rgb(255, 255, 0),
        "cyan" | "aqua" => Rgba::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Rgba::rgb(255, 0, 255),
        "silver" => Rgba::rgb(192, 192, 192),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "maroon" => Rgba::rgb(128, 0, 0),
        "olive" => Rgba::rgb(128, 128, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "teal" => Rgba::rgb(0, 128, 128),
        "navy" => Rgba::rgb(0, 0, 128),
        "orange" => Rgba::rgb(255, 165, 0),
        "pink" => Rgba::rgb(255, 192, 203),
        "brown" => Rgba::rgb(165, 42, 42),
        "gold" => Rgba::rgb(255, 215, 0),
        "indigo" => Rgba::rgb(75, 0, 130),
        "violet" => Rgba::rgb(238, 130, 238),
        "coral" => Rgba::rgb(255, 127, 80),
        "salmon" => Rgba::rgb(250, 128, 114),
        "tomato" => Rgba::rgb(255, 99, 71),
        "crimson" => Rgba::rgb(220, 20, 60),
        "turquoise" => Rgba::rgb(64, 224, 208),
        "rebeccapurple" => Rgba::rgb(102, 51, 153),
        _ => return None,
    };
    Some(rgba)
}
