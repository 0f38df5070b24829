// src/color.rs

//! Defines the RGB `Color` value type and the `ChannelRange` that clamps
//! every generated channel.
//!
//! A `Color` is three 8-bit channels in red, green, blue order. Colors that
//! come out of a `ColorGenerator` are always built through
//! `ChannelRange::ints_to_rgb`, so the generator's sub-range acts as a hard
//! floor and ceiling no matter what a caller asks for.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CanvasError, Result};

/// Lowest value a single channel byte can hold.
pub const RGB_MIN: i64 = 0;
/// Highest value a single channel byte can hold.
pub const RGB_MAX: i64 = 255;

// A color string is exactly three two-digit hex components.
const HEX_COLOR_LEN: usize = 6;

/// An RGB color, each component from 0 to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates a color from raw channel bytes. No clamping is applied.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parses a six-digit hex string such as `"ff4800"` into raw channel
    /// values. A leading `#` is not accepted; palette tokens never carry one.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let malformed = |reason: &str| CanvasError::MalformedPalette {
            token: hex.to_string(),
            reason: reason.to_string(),
        };

        if hex.len() != HEX_COLOR_LEN {
            return Err(malformed("expected exactly 6 hex digits"));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed("contains a non-hex character"));
        }

        // Every byte is ASCII at this point, so slicing on byte offsets is safe.
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| malformed(&e.to_string()))
        };
        Ok(Color::rgb(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    /// Renders the color as six lowercase hex digits, e.g. `(255, 0, 15)` -> `"ff000f"`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The channel bytes in buffer order.
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// The inclusive `[min, max]` sub-range every generated channel is clamped into.
///
/// Both bounds are themselves clamped into `[0, 255]` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRange {
    min: u8,
    max: u8,
}

impl Default for ChannelRange {
    fn default() -> Self {
        ChannelRange { min: 0, max: 255 }
    }
}

impl ChannelRange {
    pub fn new(rgb_rel_min: i64, rgb_rel_max: i64) -> Self {
        ChannelRange {
            min: rgb_rel_min.clamp(RGB_MIN, RGB_MAX) as u8,
            max: rgb_rel_max.clamp(RGB_MIN, RGB_MAX) as u8,
        }
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    // An inverted range (min > max) is allowed; max wins.
    fn clamp_channel(&self, value: i64) -> u8 {
        value.max(self.min as i64).min(self.max as i64) as u8
    }

    /// Builds a color, clamping each channel independently into this range.
    pub fn ints_to_rgb(&self, r: i64, g: i64, b: i64) -> Color {
        Color::rgb(
            self.clamp_channel(r),
            self.clamp_channel(g),
            self.clamp_channel(b),
        )
    }

    /// A grey has equal channels, so `intensity` is its brightness.
    pub fn int_to_grey_rgb(&self, intensity: i64) -> Color {
        self.ints_to_rgb(intensity, intensity, intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn ints_to_rgb_stays_within_range_for_any_input() {
        let range = ChannelRange::new(40, 200);
        for value in [-1000, -1, 0, 39, 40, 41, 128, 199, 200, 201, 255, 256, 10_000] {
            let c = range.ints_to_rgb(value, value / 2, -value);
            for channel in c.to_bytes() {
                assert!(
                    (40..=200).contains(&channel),
                    "channel {} escaped range for input {}",
                    channel,
                    value
                );
            }
        }
    }

    #[test]
    fn range_bounds_are_clamped_to_byte_limits() {
        let range = ChannelRange::new(-20, 900);
        assert_eq!(range.min(), 0);
        assert_eq!(range.max(), 255);
    }

    #[test]
    fn grey_is_equal_channels() {
        let range = ChannelRange::default();
        assert_eq!(range.int_to_grey_rgb(17), Color::rgb(17, 17, 17));
        assert_eq!(range.int_to_grey_rgb(300), Color::WHITE);
    }

    #[test]
    fn from_hex_parses_components() {
        assert_eq!(Color::from_hex("ff4800").unwrap(), Color::rgb(255, 72, 0));
        assert_eq!(Color::from_hex("0077B6").unwrap(), Color::rgb(0, 119, 182));
    }

    #[test]
    fn from_hex_rejects_malformed_tokens() {
        for bad in ["", "ff48", "ff48000", "zz4800", "ff 480", "#ff480"] {
            match Color::from_hex(bad) {
                Err(CanvasError::MalformedPalette { token, .. }) => assert_eq!(token, bad),
                other => panic!("expected MalformedPalette for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn to_hex_pads_single_digit_components() {
        assert_eq!(Color::rgb(255, 5, 0).to_hex(), "ff0500");
        assert_eq!(Color::rgb(255, 5, 0).to_string(), "#ff0500");
    }
}
