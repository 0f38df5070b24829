// src/pixel.rs

//! A single reservable canvas cell.

use crate::color::Color;

/// One canvas cell. Starts unreserved; holds a `Color` once reserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservablePixel {
    color: Option<Color>,
}

impl ReservablePixel {
    pub const fn new() -> Self {
        ReservablePixel { color: None }
    }

    /// Assigns `color`. Reserving again overwrites the previous color.
    pub fn reserve(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub fn is_reserved(&self) -> bool {
        self.color.is_some()
    }

    /// The reserved color, or `None` if the cell was never reserved.
    ///
    /// The canvas turns `None` into `CanvasError::UnreservedPixelRead`, since
    /// only it knows the cell's coordinates.
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}
