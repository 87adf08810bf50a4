//! Drawing surfaces.
//!
//! A [`Surface`] exposes the handful of operations the histogram draw pipeline uses, in
//! logical pixels. Two implementations ship with the crate:
//!
//! - [`Canvas`]: a raster surface backed by a [`Framebuffer`]. Device-pixel-ratio scaling
//!   is an explicit step ([`Canvas::autoscale`]): the backing store grows by the ratio while
//!   the logical size stays fixed, and every coordinate is scaled internally so strokes stay
//!   crisp on high-density displays.
//! - [`DisplayList`]: records each operation as a [`DrawCommand`]. Used for vector output and
//!   for checking exact geometry without rasterizing.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Point, Rect};
use crate::render::{draw_circle, draw_line, draw_rect, COORD_LIMIT};

/// A 2D drawing surface addressed in logical pixels.
pub trait Surface {
    /// Logical width in pixels.
    fn width(&self) -> u32;

    /// Logical height in pixels.
    fn height(&self) -> u32;

    /// Erase all content.
    fn clear(&mut self);

    /// Fill a circle centered at `center`.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Stroke a set of line segments with one color.
    fn stroke_lines(&mut self, lines: &[Line], color: Rgba);

    /// Fill a rectangle. Negative sizes extend left/up from the anchor.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

/// Raster drawing surface with a DPI-scaled backing store.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Logical width in pixels.
    width: u32,
    /// Logical height in pixels.
    height: u32,
    /// Device pixels per logical pixel.
    pixel_ratio: f32,
    /// Stroke width in logical pixels.
    line_width: f32,
    backing: Framebuffer,
}

impl Canvas {
    /// Create a canvas with a 1:1 backing store.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width,
            height,
            pixel_ratio: 1.0,
            line_width: 1.0,
            backing: Framebuffer::new(width, height)?,
        })
    }

    /// Scale the backing store for a display with `ratio` device pixels per logical pixel.
    ///
    /// The ratio is absolute, not cumulative: calling this twice with `2.0` leaves a 2x
    /// backing store. Like resizing an HTML canvas, this discards existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if `ratio` is not a positive finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use histo::canvas::{Canvas, Surface};
    ///
    /// let mut canvas = Canvas::new(300, 150).unwrap();
    /// canvas.autoscale(2.0).unwrap();
    /// assert_eq!(canvas.width(), 300);
    /// assert_eq!(canvas.backing().width(), 600);
    /// ```
    pub fn autoscale(&mut self, ratio: f32) -> Result<()> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(Error::Rendering(format!("invalid device pixel ratio {ratio}")));
        }
        let device_width = (self.width as f32 * ratio).ceil() as u32;
        let device_height = (self.height as f32 * ratio).ceil() as u32;
        self.backing = Framebuffer::new(device_width, device_height)?;
        self.pixel_ratio = ratio;
        tracing::debug!(
            ratio,
            logical_width = self.width,
            logical_height = self.height,
            device_width,
            device_height,
            "canvas autoscaled"
        );
        Ok(())
    }

    /// Device pixels per logical pixel.
    #[must_use]
    pub const fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Set the stroke width in logical pixels.
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    /// The device-resolution pixel buffer.
    #[must_use]
    pub const fn backing(&self) -> &Framebuffer {
        &self.backing
    }

    /// Color of the device pixel under logical point `(x, y)`.
    #[must_use]
    pub fn pixel_at(&self, x: f32, y: f32) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let device = Point::new(x, y).scale(self.pixel_ratio);
        self.backing.get_pixel(device.x.floor() as u32, device.y.floor() as u32)
    }

    /// Composite the canvas over a solid `background` at the given opacity.
    ///
    /// This is the frame a viewer sees while the canvas fades in.
    ///
    /// # Errors
    ///
    /// Returns an error if compositing fails.
    pub fn composite(&self, background: Rgba, opacity: f32) -> Result<Framebuffer> {
        let mut frame = Framebuffer::new(self.backing.width(), self.backing.height())?;
        frame.clear(background);

        // Flatten transparent canvas pixels onto the background first, so opacity only
        // controls the fade and not the canvas's own alpha.
        let mut flat = frame.clone();
        for y in 0..self.backing.height() {
            for x in 0..self.backing.width() {
                if let Some(px) = self.backing.get_pixel(x, y) {
                    if px.a > 0 {
                        flat.set_pixel(x, y, background.blend(px));
                    }
                }
            }
        }

        frame.blend_over(&flat, opacity)?;
        Ok(frame)
    }

    fn to_device(&self, value: f32) -> i32 {
        let limit = COORD_LIMIT as f32;
        (value * self.pixel_ratio).round().clamp(-limit, limit) as i32
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.backing.clear(Rgba::TRANSPARENT);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius < 0.0 {
            return;
        }
        let cx = self.to_device(center.x);
        let cy = self.to_device(center.y);
        let r = self.to_device(radius);
        draw_circle(&mut self.backing, cx, cy, r, color);
    }

    fn stroke_lines(&mut self, lines: &[Line], color: Rgba) {
        let thickness = (self.line_width * self.pixel_ratio)
            .round()
            .min(COORD_LIMIT as f32) as u32;
        if thickness == 0 {
            return;
        }
        for line in lines {
            let start = (self.to_device(line.start.x), self.to_device(line.start.y));
            let end = (self.to_device(line.end.x), self.to_device(line.end.y));
            draw_line(&mut self.backing, start, end, thickness, color);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let r = rect.normalized();
        let x0 = self.to_device(r.x);
        let y0 = self.to_device(r.y);
        let x1 = self.to_device(r.x + r.width);
        let y1 = self.to_device(r.y + r.height);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        draw_rect(
            &mut self.backing,
            x0,
            y0,
            x1.abs_diff(x0),
            y1.abs_diff(y0),
            color,
        );
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius in logical pixels.
        radius: f32,
        /// Fill color.
        color: Rgba,
    },
    /// Stroked line segments.
    Lines {
        /// Segments, in drawing order.
        lines: Vec<Line>,
        /// Stroke color.
        color: Rgba,
    },
    /// A filled rectangle, as passed by the caller (size may be negative).
    Rect {
        /// Rectangle geometry.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
}

/// A surface that records drawing operations instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl DisplayList {
    /// Create an empty display list with the given logical size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Commands recorded since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of times the surface was cleared.
    #[must_use]
    pub const fn clears(&self) -> usize {
        self.clears
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_lines(&mut self, lines: &[Line], color: Rgba) {
        self.commands.push(DrawCommand::Lines {
            lines: lines.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }
}
