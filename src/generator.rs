// src/generator.rs

//! Color generation policies.
//!
//! A `ColorGenerator` hands out one `Color` per call to `generate_color`.
//! The policy is a closed set of variants:
//!
//! - `Constant`: always black (clamped to the generator's channel range).
//! - `Ring`: walks an insertion-ordered pool of colors circularly.
//!
//! Ring pools are populated from hex strings, palette URLs, or a rainbow
//! traversal of the RGB cube's outer edges.

use log::{debug, trace, warn};

use crate::color::{ChannelRange, Color};
use crate::error::{CanvasError, Result};

/// Copies of each palette color appended to the pool.
pub const PALETTE_INSERTIONS: usize = 6;

/// State of the circular traversal policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RingPool {
    pool: Vec<Color>,
    index: usize,
}

impl RingPool {
    pub fn new(initial_index: usize) -> Self {
        RingPool {
            pool: Vec::new(),
            index: initial_index,
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.pool
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advances the index and returns the color it lands on.
    ///
    /// The index moves *before* the read, so with a fresh index of 0 the first
    /// color handed out is `pool[1]`, not `pool[0]`.
    fn next(&mut self) -> Result<Color> {
        if self.pool.is_empty() {
            return Err(CanvasError::EmptyPool);
        }
        if self.index >= self.pool.len() - 1 {
            self.index = 0;
        } else {
            self.index += 1;
        }
        Ok(self.pool[self.index])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    Constant,
    Ring(RingPool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGenerator {
    range: ChannelRange,
    policy: Policy,
}

impl Default for ColorGenerator {
    fn default() -> Self {
        ColorGenerator::constant(ChannelRange::default())
    }
}

impl ColorGenerator {
    /// A generator that always produces black.
    pub fn constant(range: ChannelRange) -> Self {
        ColorGenerator {
            range,
            policy: Policy::Constant,
        }
    }

    /// A ring generator with an empty pool. `initial_index` offsets where the
    /// traversal starts, which is useful when animating a sequence of frames.
    pub fn ring(range: ChannelRange, initial_index: usize) -> Self {
        ColorGenerator {
            range,
            policy: Policy::Ring(RingPool::new(initial_index)),
        }
    }

    pub fn range(&self) -> ChannelRange {
        self.range
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Colors currently in the ring pool; empty for the constant policy.
    pub fn pool(&self) -> &[Color] {
        match &self.policy {
            Policy::Constant => &[],
            Policy::Ring(ring) => ring.colors(),
        }
    }

    /// Produces the next color under this generator's policy.
    pub fn generate_color(&mut self) -> Result<Color> {
        match &mut self.policy {
            Policy::Constant => Ok(self.range.int_to_grey_rgb(0)),
            Policy::Ring(ring) => ring.next(),
        }
    }

    /// See `ChannelRange::ints_to_rgb`.
    pub fn ints_to_rgb(&self, r: i64, g: i64, b: i64) -> Color {
        self.range.ints_to_rgb(r, g, b)
    }

    /// See `ChannelRange::int_to_grey_rgb`.
    pub fn int_to_grey_rgb(&self, intensity: i64) -> Color {
        self.range.int_to_grey_rgb(intensity)
    }

    fn pool_mut(&mut self, operation: &str) -> Result<&mut Vec<Color>> {
        match &mut self.policy {
            Policy::Ring(ring) => Ok(&mut ring.pool),
            Policy::Constant => Err(CanvasError::InvalidArgument(format!(
                "{} requires a ring color generator",
                operation
            ))),
        }
    }

    /// Parses a six-digit hex string (e.g. `"ff0010"`) and appends the
    /// clamped color `num_insertions` times.
    pub fn add_color_from_hex(&mut self, hex: &str, num_insertions: usize) -> Result<()> {
        let raw = Color::from_hex(hex)?;
        let color = self
            .range
            .ints_to_rgb(raw.r as i64, raw.g as i64, raw.b as i64);
        let pool = self.pool_mut("add_color_from_hex")?;
        pool.extend(std::iter::repeat(color).take(num_insertions));
        trace!("Added {} x{} to ring pool", color, num_insertions);
        Ok(())
    }

    /// Appends every color of a palette reference such as
    /// `https://coolors.co/ff4800-ff5400-ff6000`.
    ///
    /// Only the text after the final `/` is read; it must be `-`-separated
    /// six-digit hex tokens. All tokens are validated before any is appended,
    /// so a malformed palette leaves the pool untouched. An empty final
    /// segment adds nothing.
    pub fn add_palette_from_url(&mut self, url: &str) -> Result<()> {
        // `rsplit` always yields at least one item.
        let segment = url.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            warn!("Palette reference '{}' has no colors after the final '/'", url);
            return Ok(());
        }

        let colors = segment
            .split('-')
            .map(Color::from_hex)
            .collect::<Result<Vec<_>>>()?;

        let range = self.range;
        let pool = self.pool_mut("add_palette_from_url")?;
        for raw in &colors {
            let color = range.ints_to_rgb(raw.r as i64, raw.g as i64, raw.b as i64);
            pool.extend(std::iter::repeat(color).take(PALETTE_INSERTIONS));
        }
        debug!(
            "Added palette of {} colors from '{}' (pool size now {})",
            colors.len(),
            url,
            pool.len()
        );
        Ok(())
    }

    /// Appends a smooth rainbow by walking the edges of the RGB cube bounded
    /// by this generator's channel range.
    ///
    /// One channel moves per phase while the other two sit at the range
    /// extremes: red to magenta, magenta to blue, blue to teal, teal to green,
    /// green to yellow, yellow back to red. Each phase is half-open, so a
    /// range that is not a multiple of `step_size` stops short of the far bound.
    pub fn add_rainbow(&mut self, step_size: usize) -> Result<()> {
        if step_size == 0 {
            return Err(CanvasError::InvalidArgument(
                "rainbow step size must be at least 1".to_string(),
            ));
        }

        let range = self.range;
        let (lo, hi) = (range.min() as i64, range.max() as i64);
        let rising = || (lo..hi).step_by(step_size);
        let falling = || ((lo + 1)..=hi).rev().step_by(step_size);

        let mut rainbow = Vec::new();
        rainbow.extend(rising().map(|b| range.ints_to_rgb(hi, lo, b)));
        rainbow.extend(falling().map(|r| range.ints_to_rgb(r, lo, hi)));
        rainbow.extend(rising().map(|g| range.ints_to_rgb(lo, g, hi)));
        rainbow.extend(falling().map(|b| range.ints_to_rgb(lo, hi, b)));
        rainbow.extend(rising().map(|r| range.ints_to_rgb(r, hi, lo)));
        rainbow.extend(falling().map(|g| range.ints_to_rgb(hi, g, lo)));

        let pool = self.pool_mut("add_rainbow")?;
        debug!(
            "Added rainbow of {} colors (step {}, bounds {}..{})",
            rainbow.len(),
            step_size,
            lo,
            hi
        );
        pool.extend(rainbow);
        Ok(())
    }
}
