//! Color types and CSS color parsing.
//!
//! Style rules describe colors as CSS strings (`#4682b4`, `rgb(70, 130, 180)`,
//! `hsl(207, 44%, 49%)`, `steelblue`). [`Rgba::parse_css`] turns those into the 8-bit
//! RGBA values the canvas paints with, and [`Rgba::to_css`] goes back for vector output.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

/// CSS named colors understood by [`Rgba::parse_css`].
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("transparent", Rgba::TRANSPARENT),
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("red", Rgba::RED),
    ("lime", Rgba::GREEN),
    ("green", Rgba::rgb(0, 128, 0)),
    ("blue", Rgba::BLUE),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("steelblue", Rgba::rgb(70, 130, 180)),
    ("tomato", Rgba::rgb(255, 99, 71)),
];

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Composite `top` over this color using `top`'s alpha, keeping this color's alpha.
    #[must_use]
    pub fn blend(self, top: Rgba) -> Rgba {
        let t = f32::from(top.a) / 255.0;
        let mix = |dst: u8, src: u8| -> u8 {
            (f32::from(dst) * (1.0 - t) + f32::from(src) * t).round() as u8
        };
        Rgba::new(mix(self.r, top.r), mix(self.g, top.g), mix(self.b, top.b), self.a)
    }

    /// Parse a CSS color value.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`,
    /// `hsla()` and a small set of named colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the value is not one of those forms.
    ///
    /// # Example
    ///
    /// ```
    /// use histo::color::Rgba;
    ///
    /// assert_eq!(Rgba::parse_css("#f00").unwrap(), Rgba::RED);
    /// assert_eq!(Rgba::parse_css("rgb(0, 0, 255)").unwrap(), Rgba::BLUE);
    /// ```
    pub fn parse_css(value: &str) -> Result<Self> {
        let value = value.trim().to_ascii_lowercase();
        let invalid = || Error::InvalidColor(value.clone());

        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        if let Some((func, args)) = split_function(&value) {
            let args: Vec<&str> = args
                .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect();
            let parsed = match (func, args.len()) {
                ("rgb", 3) | ("rgba", 4) | ("rgb", 4) => parse_rgb_args(&args),
                ("hsl", 3) | ("hsla", 4) | ("hsl", 4) => parse_hsl_args(&args),
                _ => None,
            };
            return parsed.ok_or_else(invalid);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }

    /// Format as a CSS hex color (`#rrggbb`, or `#rrggbbaa` when not opaque).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_css(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Split `name(args)` into its name and argument text.
fn split_function(value: &str) -> Option<(&str, &str)> {
    let open = value.find('(')?;
    let args = value[open + 1..].strip_suffix(')')?;
    Some((value[..open].trim(), args))
}

/// Parse a channel given as `0-255` or as a percentage.
fn parse_channel(arg: &str) -> Option<u8> {
    let v = if let Some(pct) = arg.strip_suffix('%') {
        pct.parse::<f32>().ok()? * 2.55
    } else {
        arg.parse::<f32>().ok()?
    };
    v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
}

/// Parse an alpha value given as `0.0-1.0` or as a percentage.
fn parse_alpha(arg: Option<&&str>) -> Option<u8> {
    let Some(arg) = arg else {
        return Some(255);
    };
    let v = if let Some(pct) = arg.strip_suffix('%') {
        pct.parse::<f32>().ok()? / 100.0
    } else {
        arg.parse::<f32>().ok()?
    };
    v.is_finite().then(|| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn parse_rgb_args(args: &[&str]) -> Option<Rgba> {
    Some(Rgba::new(
        parse_channel(args[0])?,
        parse_channel(args[1])?,
        parse_channel(args[2])?,
        parse_alpha(args.get(3))?,
    ))
}

fn parse_hsl_args(args: &[&str]) -> Option<Rgba> {
    let h = args[0].trim_end_matches("deg").parse::<f32>().ok()?;
    let s = args[1].strip_suffix('%')?.parse::<f32>().ok()? / 100.0;
    let l = args[2].strip_suffix('%')?.parse::<f32>().ok()? / 100.0;
    if !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return None;
    }
    let alpha = parse_alpha(args.get(3))?;
    let hsla = Hsla::hsl(h.rem_euclid(360.0), s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
    Some(hsla.to_rgba().with_alpha(alpha))
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(Rgba::parse_css("#fff").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse_css("#0f08").unwrap(), Rgba::new(0, 255, 0, 136));
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(Rgba::parse_css("#4682B4").unwrap(), Rgba::rgb(70, 130, 180));
        assert_eq!(Rgba::parse_css("#ff000080").unwrap(), Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(Rgba::parse_css("rgb(10, 20, 30)").unwrap(), Rgba::rgb(10, 20, 30));
        assert_eq!(
            Rgba::parse_css("rgba(10, 20, 30, 0.5)").unwrap(),
            Rgba::new(10, 20, 30, 128)
        );
        assert_eq!(Rgba::parse_css("rgb(100%, 0%, 0%)").unwrap(), Rgba::RED);
        assert_eq!(Rgba::parse_css("rgb(1 2 3 / 50%)").unwrap(), Rgba::new(1, 2, 3, 128));
    }

    #[test]
    fn test_parse_hsl_function() {
        let red = Rgba::parse_css("hsl(0, 100%, 50%)").unwrap();
        assert_eq!(red, Rgba::RED);

        let gray = Rgba::parse_css("hsla(0deg, 0%, 50%, 1)").unwrap();
        assert_eq!(gray, Rgba::rgb(127, 127, 127));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgba::parse_css("Black").unwrap(), Rgba::BLACK);
        assert_eq!(Rgba::parse_css(" steelblue ").unwrap(), Rgba::rgb(70, 130, 180));
        assert_eq!(Rgba::parse_css("transparent").unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "#12", "#ggg", "rgb(1, 2)", "rgb(a, b, c)", "hsl(0, 1, 2)", "chartreuse"] {
            assert!(
                matches!(Rgba::parse_css(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::rgb(70, 130, 180).to_css(), "#4682b4");
        assert_eq!(Rgba::new(255, 0, 0, 128).to_string(), "#ff000080");
    }

    #[test]
    fn test_from_str_and_back() {
        let c: Rgba = "#336699".parse().unwrap();
        assert_eq!(String::from(c), "#336699");
    }

    #[test]
    fn test_hsla_to_rgba() {
        let red = Hsla::hsl(0.0, 1.0, 0.5).to_rgba();
        assert_eq!(red, Rgba::RED);

        let dark_red = Hsla::hsl(0.0, 1.0, 0.25).to_rgba();
        assert_eq!(dark_red.r, 127);
        assert_eq!(dark_red.g, 0);
    }

    #[test]
    fn test_hsla_to_rgba_cyan() {
        let cyan = Hsla::hsl(180.0, 1.0, 0.5).to_rgba();
        assert_eq!(cyan.r, 0);
        // Allow for floating point rounding (254 or 255)
        assert!(cyan.g >= 254);
        assert!(cyan.b >= 254);
    }

    #[test]
    fn test_blend_respects_top_alpha() {
        assert_eq!(Rgba::WHITE.blend(Rgba::BLACK), Rgba::BLACK);
        assert_eq!(Rgba::WHITE.blend(Rgba::TRANSPARENT), Rgba::WHITE);
        let half = Rgba::WHITE.blend(Rgba::BLACK.with_alpha(128));
        assert_eq!(half.r, 127);
        assert_eq!(half.a, 255);
    }

    #[test]
    fn test_rgba_with_alpha() {
        let semi_red = Rgba::RED.with_alpha(128);
        assert_eq!(semi_red.r, 255);
        assert_eq!(semi_red.a, 128);
    }
}
