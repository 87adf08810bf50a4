//! # Histo
//!
//! A labelled-bar histogram widget drawn onto a DPI-aware pixel surface.
//!
//! Points are `label → value` pairs. Plotting merges them into the widget (last write per
//! label wins) and redraws the whole chart: an origin marker, two axis lines, and one bar
//! per label. Bars scale so the largest magnitude fills the drawable height, and they are
//! colored by a [`style::ColorRule`].
//!
//! ## Quick Start
//!
//! ```rust
//! use histo::prelude::*;
//!
//! let mut histo = Histo::new(Some("requests"), HistoStyle::default().pixel_ratio(2.0))?;
//! histo.plot([("GET", 120.0), ("POST", 45.0)])?;
//! histo.plot(("DELETE", -3.0))?;
//!
//! assert_eq!(histo.upper(), Some(120.0));
//! assert_eq!(histo.surface().backing().width(), 600);
//! # Ok::<(), histo::Error>(())
//! ```
//!
//! ## Surfaces
//!
//! - [`canvas::Canvas`]: SIMD-aligned raster surface, exported as PNG or embedded SVG
//! - [`canvas::DisplayList`]: records draw commands, exported as vector SVG
//!
//! ## Styling
//!
//! [`style::HistoStyle`] resolves dimensions and colors either from a YAML file or from
//! CSS-like rules queried by selector and property.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and CSS color parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, lines, rectangles).
pub mod geometry;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Drawing surfaces.
pub mod canvas;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Widget Modules
// ============================================================================

/// Labelled point storage.
pub mod store;

/// Widget event notification.
pub mod notify;

/// Style resolution and configuration.
pub mod style;

/// The histogram widget.
pub mod widget;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for histo operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use histo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, DisplayList, DrawCommand, Surface};
    pub use crate::color::{Hsla, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::notify::{Event, SubscriptionId};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::store::{PointStore, Points};
    pub use crate::style::{ColorRule, HistoStyle, StyleReader, StyleRules};
    pub use crate::widget::{Bar, Histo, Layout, WidgetState};
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
