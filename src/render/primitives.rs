//! Primitive rendering functions.
//!
//! All coordinates here are device pixels. Logical-to-device scaling happens in
//! [`crate::canvas::Canvas`] before these are called.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Largest coordinate magnitude the rasterizers work with. Inputs are clamped to
/// `±COORD_LIMIT` so the integer arithmetic below cannot overflow.
pub const COORD_LIMIT: i32 = 1 << 20;

#[inline]
fn clamp_coord(v: i32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm with a square brush.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `thickness` - Brush size in pixels (at least 1)
/// * `color` - Line color
pub fn draw_line(
    fb: &mut Framebuffer,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    thickness: u32,
    color: Rgba,
) {
    let (x0, y0, x1, y1) = (clamp_coord(x0), clamp_coord(y0), clamp_coord(x1), clamp_coord(y1));
    let thickness = thickness.clamp(1, COORD_LIMIT as u32);
    // Brush is centered on the ideal line, biased toward top-left for even sizes.
    let offset = ((thickness - 1) / 2) as i32;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        stamp(fb, x - offset, y - offset, thickness, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Fill a `size`×`size` square whose top-left corner may lie off-buffer.
#[inline]
fn stamp(fb: &mut Framebuffer, x: i32, y: i32, size: u32, color: Rgba) {
    if size == 1 {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }
        return;
    }
    draw_rect(fb, x, y, size, size, color);
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle, clipping any part that lies left of or above the buffer.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let clip_x = if x < 0 { x.unsigned_abs() } else { 0 };
    let clip_y = if y < 0 { y.unsigned_abs() } else { 0 };
    if clip_x >= width || clip_y >= height {
        return;
    }
    fb.fill_rect(
        x.max(0) as u32,
        y.max(0) as u32,
        width - clip_x,
        height - clip_y,
        color,
    );
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `cx`, `cy` - Center coordinates
/// * `radius` - Circle radius in pixels
/// * `color` - Fill color
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let (cx, cy, radius) = (clamp_coord(cx), clamp_coord(cy), clamp_coord(radius));
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }
    if cx + radius < 0
        || cy + radius < 0
        || cx - radius >= fb.width() as i32
        || cy - radius >= fb.height() as i32
    {
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        // One scan line per octant pair
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = x2.saturating_add(1).clamp(0, fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white_fb(w: u32, h: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = white_fb(100, 100);
        draw_line(&mut fb, (10, 50), (90, 50), 1, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 51), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_vertical_thick() {
        let mut fb = white_fb(100, 100);
        draw_line(&mut fb, (50, 10), (50, 90), 2, Rgba::BLACK);

        assert_eq!(fb.get_pixel(50, 10), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(51, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(52, 50), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = white_fb(100, 100);
        draw_line(&mut fb, (10, 10), (90, 90), 1, Rgba::BLACK);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = white_fb(100, 100);
        // Line that goes out of bounds should not panic
        draw_line(&mut fb, (-10, -10), (110, 110), 3, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_rect_clips_negative_origin() {
        let mut fb = white_fb(20, 20);
        draw_rect(&mut fb, -5, -5, 10, 10, Rgba::RED);

        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(4, 4), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_fully_clipped() {
        let mut fb = white_fb(20, 20);
        draw_rect(&mut fb, -10, 0, 10, 10, Rgba::RED);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = white_fb(100, 100);
        draw_circle(&mut fb, 50, 50, 20, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(70, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_at_corner_is_clipped() {
        let mut fb = white_fb(10, 10);
        draw_circle(&mut fb, 0, 9, 4, Rgba::BLUE);
        assert_eq!(fb.get_pixel(0, 9), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(9, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut fb = white_fb(20, 20);
        draw_line(&mut fb, (i32::MIN, 5), (i32::MAX, 5), 2, Rgba::BLACK);
        draw_line(&mut fb, (i32::MAX, i32::MAX), (i32::MAX, i32::MIN), 1, Rgba::BLACK);
        draw_circle(&mut fb, i32::MIN, i32::MAX, i32::MAX, Rgba::RED);
        draw_circle(&mut fb, i32::MAX, 0, 10, Rgba::RED);

        assert_eq!(fb.get_pixel(10, 5), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(10, 15), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_covering_buffer_fills_it() {
        let mut fb = white_fb(10, 10);
        draw_circle(&mut fb, 5, 5, COORD_LIMIT, Rgba::BLUE);
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(9, 9), Some(Rgba::BLUE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = white_fb(100, 100);
        draw_circle(&mut fb, 50, 50, 0, Rgba::RED);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::RED));
    }
}
