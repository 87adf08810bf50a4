//! Rasterization of the primitives a histogram needs.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: axis strokes, with a square brush for high-density displays
//! - **Midpoint Circle**: the filled origin marker
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_circle, draw_line, draw_rect, COORD_LIMIT};
