// src/error.rs

//! Error type shared by every canvas and generator operation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Pixel at ({x}, {y}) was read before it was reserved")]
    UnreservedPixelRead { x: usize, y: usize },
    #[error("Ring color generator has an empty pool; populate it before generating colors")]
    EmptyPool,
    #[error("Malformed palette token '{token}': {reason}")]
    MalformedPalette { token: String, reason: String },
    #[error("Column {x} is outside the canvas (width {width})")]
    ColumnOutOfBounds { x: i64, width: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CanvasError>;
