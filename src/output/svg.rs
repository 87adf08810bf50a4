//! SVG output encoder.
//!
//! Two routes: a raster [`Canvas`] is embedded as a base64 PNG, while a recorded
//! [`DisplayList`] becomes true vector elements.

use crate::canvas::{Canvas, DisplayList, DrawCommand, Surface};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Line, Rect};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for canvas and display-list output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Filled rectangle with non-negative size.
    Rect { rect: Rect, fill: Rgba },
    /// Filled circle.
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba },
    /// Stroked line segment.
    Line {
        line: Line,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Embedded raster image (PNG data URI).
    Image {
        width: f32,
        height: f32,
        data: String,
    },
}

impl SvgEncoder {
    /// Create an empty SVG with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Embed a canvas backing store as a PNG image.
    ///
    /// The document keeps the canvas's logical size, so a HiDPI backing store is
    /// downscaled by the viewer rather than losing detail.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn from_canvas(canvas: &Canvas) -> Result<Self> {
        let png_bytes = super::PngEncoder::to_bytes(canvas.backing())?;
        let data = format!("data:image/png;base64,{}", STANDARD.encode(&png_bytes));

        let mut encoder = Self::new(canvas.width(), canvas.height());
        encoder.background = None;
        encoder.elements.push(SvgElement::Image {
            width: canvas.width() as f32,
            height: canvas.height() as f32,
            data,
        });
        Ok(encoder)
    }

    /// Convert recorded draw commands into vector elements.
    ///
    /// Rectangles are normalized and zero-area ones dropped, matching what the raster
    /// canvas paints.
    #[must_use]
    pub fn from_display_list(list: &DisplayList, stroke_width: f32) -> Self {
        let mut encoder = Self::new(list.width(), list.height());
        for command in list.commands() {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => encoder.elements.push(SvgElement::Circle {
                    cx: center.x,
                    cy: center.y,
                    r: *radius,
                    fill: *color,
                }),
                DrawCommand::Lines { lines, color } => {
                    encoder
                        .elements
                        .extend(lines.iter().map(|&line| SvgElement::Line {
                            line,
                            stroke: *color,
                            stroke_width,
                        }));
                }
                DrawCommand::Rect { rect, color } => {
                    let rect = rect.normalized();
                    if rect.area() > 0.0 {
                        encoder.elements.push(SvgElement::Rect { rect, fill: *color });
                    }
                }
            }
        }
        encoder
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Elements in painting order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(1024 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{bg}"/>"#);
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        tracing::debug!(elements = self.elements.len(), "svg written");
        Ok(())
    }
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { rect, fill } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"/>"#,
            rect.x, rect.y, rect.width, rect.height
        ),
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#)
        }
        SvgElement::Line {
            line,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#,
            line.start.x, line.start.y, line.end.x, line.end.y
        ),
        SvgElement::Image {
            width,
            height,
            data,
        } => format!(
            r#"<image x="0" y="0" width="{width}" height="{height}" xlink:href="{data}"/>"#
        ),
    }
}
