//! Error types for histo operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in histo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a canvas backing store.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A plot call carried no label/value pairs.
    #[error("Plot called without any points")]
    EmptyPlot,

    /// A plotted value was NaN or infinite.
    #[error("Value for label '{label}' is not finite")]
    NonFiniteValue {
        /// Label whose value was rejected.
        label: String,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Style sheet or style configuration could not be parsed.
    #[error("Style error at line {line}: {message}")]
    StyleParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
