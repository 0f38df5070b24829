// src/lib.rs

//! `procimg` builds raster images procedurally.
//!
//! Pixels are *reserved* with colors drawn from a pluggable
//! `ColorGenerator`, through background fills, random rectangular
//! partitions, plotted functions and vertical slices. `Canvas::finalize`
//! flattens the result into a row-major RGB byte buffer for an external
//! encoder.
//!
//! ```
//! use procimg::{Canvas, ChannelRange, ColorGenerator};
//!
//! let mut generator = ColorGenerator::ring(ChannelRange::default(), 0);
//! generator.add_palette_from_url("https://coolors.co/ff4800-ff5400-ff6000")?;
//!
//! let mut canvas = Canvas::seeded(32, 16, generator, 7)?;
//! canvas.reserve_white_background();
//! for _ in 0..5 {
//!     canvas.divide_random_region_in_two();
//! }
//! canvas.reserve_all_regions()?;
//!
//! let buffer = canvas.finalize()?;
//! assert_eq!(buffer.len(), 32 * 16 * 3);
//! # Ok::<(), procimg::CanvasError>(())
//! ```

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod pixel;
pub mod plot;
pub mod region;
pub mod scene;
pub mod slices;

pub use canvas::Canvas;
pub use color::{ChannelRange, Color};
pub use error::{CanvasError, Result};
pub use generator::ColorGenerator;
pub use region::{RectangularRegion, RegionList};
pub use slices::VerticalSliceSet;
