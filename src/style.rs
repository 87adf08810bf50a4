//! Histogram styling.
//!
//! [`HistoStyle`] is the immutable record the draw pipeline reads. It can be built three
//! ways:
//!
//! - defaults ([`HistoStyle::default`]),
//! - YAML ([`HistoStyle::from_yaml`], [`HistoStyle::load`]),
//! - CSS-like rules through any [`StyleReader`], e.g. [`StyleRules::parse`] followed by
//!   [`HistoStyle::from_reader`].
//!
//! Rule lookup happens once, when the record is built. Missing rules keep their default.
//! Malformed, non-finite or negative lengths keep their default and log a warning
//! ([`HistoStyle::sanitized`]), so drawing never sees NaN geometry.

use crate::color::Rgba;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Read access to style rules keyed by selector and property.
pub trait StyleReader {
    /// Raw value for `property` under `selector`, if a rule sets it.
    fn read(&self, selector: &str, property: &str) -> Option<String>;
}

impl<F> StyleReader for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn read(&self, selector: &str, property: &str) -> Option<String> {
        self(selector, property)
    }
}

/// Parse a pixel length such as `"12px"`.
///
/// Only the first space-separated token is used, so shorthand like `"20px 10px"` yields
/// `20.0`. Fractions are kept (`"7.5px"` is `7.5`, not truncated to `7`). Returns `None`
/// for anything that is not a finite number.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    let token = value.split_whitespace().next()?;
    let number = token.strip_suffix("px").unwrap_or(token);
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

// ============================================================================
// Style rules
// ============================================================================

/// A parsed set of CSS-like rules.
///
/// Supports `selector, selector { property: value; }` blocks and `/* */` comments. When a
/// property is set more than once for a selector, the last declaration wins.
///
/// # Example
///
/// ```
/// use histo::style::{StyleReader, StyleRules};
///
/// let rules = StyleRules::parse(".histo .bar { width: 6px; background-color: #036; }").unwrap();
/// assert_eq!(rules.read(".histo .bar", "width").as_deref(), Some("6px"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRules {
    declarations: HashMap<(String, String), String>,
}

impl StyleRules {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rules from style sheet text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StyleParse`] with the offending line for unbalanced braces,
    /// declarations outside a block, or declarations without a `:`.
    pub fn parse(css: &str) -> Result<Self> {
        let mut rules = Self::new();
        let text = strip_comments(css);

        let mut rest = text.as_str();
        let mut consumed = 0;
        loop {
            let Some(open) = rest.find('{') else {
                if let Some(pos) = rest.find('}') {
                    return Err(parse_error(&text, consumed + pos, "unexpected '}'"));
                }
                if !rest.trim().is_empty() {
                    return Err(parse_error(&text, consumed, "declarations outside a rule block"));
                }
                break;
            };

            let head = &rest[..open];
            if let Some(pos) = head.find('}') {
                return Err(parse_error(&text, consumed + pos, "unexpected '}'"));
            }
            let body_start = open + 1;
            let Some(close) = rest[body_start..].find('}') else {
                return Err(parse_error(&text, consumed + open, "missing '}'"));
            };
            let body = &rest[body_start..body_start + close];
            if let Some(pos) = body.find('{') {
                return Err(parse_error(&text, consumed + body_start + pos, "nested '{'"));
            }

            let selectors: Vec<String> = head
                .split(',')
                .map(normalize_selector)
                .filter(|s| !s.is_empty())
                .collect();
            if selectors.is_empty() {
                return Err(parse_error(&text, consumed + open, "rule without a selector"));
            }

            let mut offset = consumed + body_start;
            for declaration in body.split(';') {
                let trimmed = declaration.trim();
                if !trimmed.is_empty() {
                    let Some((property, value)) = trimmed.split_once(':') else {
                        return Err(parse_error(&text, offset, "declaration without ':'"));
                    };
                    let property = property.trim().to_ascii_lowercase();
                    let value = value.trim().to_string();
                    for selector in &selectors {
                        rules.set(selector, &property, &value);
                    }
                }
                offset += declaration.len() + 1;
            }

            let advance = body_start + close + 1;
            consumed += advance;
            rest = &rest[advance..];
        }

        tracing::debug!(declarations = rules.len(), "parsed style rules");
        Ok(rules)
    }

    /// Set one declaration, replacing any previous value.
    pub fn set(&mut self, selector: &str, property: &str, value: &str) {
        self.declarations.insert(
            (normalize_selector(selector), property.trim().to_ascii_lowercase()),
            value.trim().to_string(),
        );
    }

    /// Number of stored declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether no declaration is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl StyleReader for StyleRules {
    fn read(&self, selector: &str, property: &str) -> Option<String> {
        self.declarations
            .get(&(normalize_selector(selector), property.to_ascii_lowercase()))
            .cloned()
    }
}

fn normalize_selector(selector: &str) -> String {
    selector.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace comment text with spaces, keeping newlines so line numbers stay valid.
fn strip_comments(css: &str) -> String {
    let blank = |c: char| if c == '\n' { '\n' } else { ' ' };
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        out.push_str("  ");
        match after.find("*/") {
            Some(end) => {
                out.extend(after[..end].chars().map(blank));
                out.push_str("  ");
                rest = &after[end + 2..];
            }
            None => {
                out.extend(after.chars().map(blank));
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_error(text: &str, byte_offset: usize, message: &str) -> Error {
    let clamped = byte_offset.min(text.len());
    let line = text.as_bytes()[..clamped].iter().filter(|&&b| b == b'\n').count() + 1;
    Error::StyleParse {
        line,
        message: message.to_string(),
    }
}

// ============================================================================
// Resolved style record
// ============================================================================

/// Rule deciding which bars use the alternate color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRule {
    /// Primary color only for integers in `[0, 2^32)`; everything else (fractions,
    /// negatives, huge values) gets the alternate color.
    #[default]
    UnsignedInteger,
    /// Alternate color for negative values only.
    Sign,
}

impl ColorRule {
    /// Whether `value` is drawn in the primary bar color.
    #[must_use]
    pub fn is_primary(self, value: f64) -> bool {
        match self {
            Self::UnsignedInteger => {
                value.fract() == 0.0 && (0.0..4_294_967_296.0).contains(&value)
            }
            Self::Sign => value >= 0.0,
        }
    }
}

/// Every visual parameter the draw pipeline consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoStyle {
    /// Logical canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Logical canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Space between the canvas edge and the drawable area, on every side.
    #[serde(default = "default_padding")]
    pub padding: f32,

    /// Origin marker radius.
    #[serde(default = "default_origin_size")]
    pub origin_size: f32,

    /// Origin marker fill.
    #[serde(default = "default_origin_color")]
    pub origin_color: Rgba,

    /// Axis stroke color.
    #[serde(default = "default_axis_color")]
    pub axis_color: Rgba,

    /// Axis stroke width.
    #[serde(default = "default_axis_width")]
    pub axis_width: f32,

    /// Width of one bar; the gap between bars is the same.
    #[serde(default = "default_bar_width")]
    pub bar_width: f32,

    /// Primary bar color.
    #[serde(default = "default_bar_color")]
    pub bar_color: Rgba,

    /// Alternate bar color.
    #[serde(default = "default_negative_bar_color")]
    pub negative_bar_color: Rgba,

    /// Which bars get the alternate color.
    #[serde(default)]
    pub color_rule: ColorRule,

    /// Page color the canvas fades in over.
    #[serde(default = "default_background")]
    pub background: Rgba,

    /// Device pixels per logical pixel.
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f32,

    /// Length of the fade-in once the canvas is shown.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_width() -> u32 {
    300
}
fn default_height() -> u32 {
    150
}
fn default_padding() -> f32 {
    20.0
}
fn default_origin_size() -> f32 {
    4.0
}
fn default_origin_color() -> Rgba {
    Rgba::rgb(51, 51, 51)
}
fn default_axis_color() -> Rgba {
    Rgba::rgb(153, 153, 153)
}
fn default_axis_width() -> f32 {
    1.0
}
fn default_bar_width() -> f32 {
    8.0
}
fn default_bar_color() -> Rgba {
    Rgba::rgb(70, 130, 180) // Steel blue
}
fn default_negative_bar_color() -> Rgba {
    Rgba::rgb(255, 99, 71) // Tomato
}
fn default_background() -> Rgba {
    Rgba::WHITE
}
fn default_pixel_ratio() -> f32 {
    1.0
}
fn default_transition_ms() -> u64 {
    300
}

impl Default for HistoStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            origin_size: default_origin_size(),
            origin_color: default_origin_color(),
            axis_color: default_axis_color(),
            axis_width: default_axis_width(),
            bar_width: default_bar_width(),
            bar_color: default_bar_color(),
            negative_bar_color: default_negative_bar_color(),
            color_rule: ColorRule::default(),
            background: default_background(),
            pixel_ratio: default_pixel_ratio(),
            transition_ms: default_transition_ms(),
        }
    }
}

/// Selector of the chart container.
pub const SELECTOR_HISTO: &str = ".histo";
/// Selector carrying the drawable-area padding.
pub const SELECTOR_GRAM: &str = ".histo .gram";
/// Selector of the origin marker.
pub const SELECTOR_ORIGO: &str = ".histo .origo";
/// Selector of the axis lines.
pub const SELECTOR_AXIS: &str = ".histo .axis";
/// Selector of primary bars.
pub const SELECTOR_BAR: &str = ".histo .bar";
/// Selector of alternate bars.
pub const SELECTOR_NEGATIVE_BAR: &str = ".histo .negative-bar";

impl HistoStyle {
    /// Creates a style with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a style from CSS-like rules, starting from the defaults.
    ///
    /// Reads `.histo` width/height, `.histo .gram` padding, `.histo .origo` width and
    /// background-color, `.histo .axis` background-color, `.histo .bar` width and
    /// background-color, and `.histo .negative-bar` background-color.
    #[must_use]
    pub fn from_reader(reader: &impl StyleReader) -> Self {
        let mut style = Self::default();

        if let Some(v) = read_px(reader, SELECTOR_HISTO, "width") {
            style.width = v.max(0.0) as u32;
        }
        if let Some(v) = read_px(reader, SELECTOR_HISTO, "height") {
            style.height = v.max(0.0) as u32;
        }
        if let Some(v) = read_px(reader, SELECTOR_GRAM, "padding") {
            style.padding = v;
        }
        if let Some(v) = read_px(reader, SELECTOR_ORIGO, "width") {
            style.origin_size = v;
        }
        if let Some(c) = read_color(reader, SELECTOR_ORIGO) {
            style.origin_color = c;
        }
        if let Some(c) = read_color(reader, SELECTOR_AXIS) {
            style.axis_color = c;
        }
        if let Some(v) = read_px(reader, SELECTOR_BAR, "width") {
            style.bar_width = v;
        }
        if let Some(c) = read_color(reader, SELECTOR_BAR) {
            style.bar_color = c;
        }
        if let Some(c) = read_color(reader, SELECTOR_NEGATIVE_BAR) {
            style.negative_bar_color = c;
        }

        style.sanitized()
    }

    /// Replace numeric fields the renderer cannot use with their defaults.
    ///
    /// `padding`, `origin_size`, `axis_width` and `bar_width` must be finite and
    /// non-negative, and `pixel_ratio` finite and positive. Each replacement is logged.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        sanitize_length(&mut self.padding, "padding", default_padding());
        sanitize_length(&mut self.origin_size, "origin_size", default_origin_size());
        sanitize_length(&mut self.axis_width, "axis_width", default_axis_width());
        sanitize_length(&mut self.bar_width, "bar_width", default_bar_width());
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            tracing::warn!(value = self.pixel_ratio, "ignoring invalid pixel ratio");
            self.pixel_ratio = default_pixel_ratio();
        }
        self
    }

    /// Parses a style from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map(Self::sanitized).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::StyleParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads a style from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Loads a style with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default histogram style");
            Self::default()
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::StyleParse {
            line: 0,
            message: e.to_string(),
        })
    }

    /// Set the primary and alternate bar colors.
    #[must_use]
    pub fn bar_colors(mut self, primary: Rgba, alternate: Rgba) -> Self {
        self.bar_color = primary;
        self.negative_bar_color = alternate;
        self
    }

    /// Set the rule choosing the alternate bar color.
    #[must_use]
    pub fn color_rule(mut self, rule: ColorRule) -> Self {
        self.color_rule = rule;
        self
    }

    /// Set the device pixel ratio.
    #[must_use]
    pub fn pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    /// Color for a bar with the given value.
    #[must_use]
    pub fn bar_color_for(&self, value: f64) -> Rgba {
        if self.color_rule.is_primary(value) {
            self.bar_color
        } else {
            self.negative_bar_color
        }
    }
}

impl batuta_common::display::WithDimensions for HistoStyle {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

fn read_px(reader: &impl StyleReader, selector: &str, property: &str) -> Option<f32> {
    let raw = reader.read(selector, property)?;
    let parsed = parse_px(&raw);
    if parsed.is_none() {
        tracing::warn!(selector, property, value = %raw, "ignoring malformed pixel value");
    }
    parsed
}

fn sanitize_length(value: &mut f32, field: &str, fallback: f32) {
    if !(value.is_finite() && *value >= 0.0) {
        tracing::warn!(field, value = *value, fallback, "ignoring invalid style length");
        *value = fallback;
    }
}

fn read_color(reader: &impl StyleReader, selector: &str) -> Option<Rgba> {
    let raw = reader.read(selector, "background-color")?;
    match Rgba::parse_css(&raw) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::warn!(selector, error = %e, "ignoring malformed color");
            None
        }
    }
}
