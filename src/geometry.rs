//! Geometric primitives for the histogram layout.
//!
//! All coordinates are logical pixels in a y-down coordinate system.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiply both coordinates by `factor`.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }
}

/// A rectangle anchored at `(x, y)`.
///
/// Width and height may be negative, in which case the rectangle extends left or up from
/// the anchor, the same way a 2D canvas `fillRect` treats them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the anchor corner.
    pub x: f32,
    /// Y coordinate of the anchor corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Equivalent rectangle with the anchor at the top-left corner and non-negative size.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    /// Get the area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.width * self.height).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_scale() {
        let p = Point::new(3.0, 4.5).scale(2.0);
        assert!((p.x - 6.0).abs() < 0.001);
        assert!((p.y - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_rect_normalized_negative_height() {
        let bar = Rect::new(10.0, 100.0, 5.0, -40.0).normalized();
        assert_eq!(bar, Rect::new(10.0, 60.0, 5.0, 40.0));
    }

    #[test]
    fn test_rect_normalized_negative_width() {
        let r = Rect::new(10.0, 10.0, -4.0, 2.0).normalized();
        assert_eq!(r, Rect::new(6.0, 10.0, 4.0, 2.0));
    }

    #[test]
    fn test_rect_area() {
        let rect = Rect::new(0.0, 0.0, 10.0, -5.0);
        assert!((rect.area() - 50.0).abs() < 0.001);
    }
}
