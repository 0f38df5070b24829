// src/plot.rs

//! Geometry for function plotting: coordinate translation, square brush
//! footprints and straight lines through two points.
//!
//! Plotted functions live in mathematical space (origin bottom-left, `y`
//! grows upward). The canvas stores rows top-down, so every plotted `y` goes
//! through `to_storage_y` before it indexes a row.

use std::ops::RangeInclusive;

/// A point in storage coordinates.
pub type Dot = (usize, usize);

/// Translates a mathematical `y` into a storage row: `floor(height - 1 - y)`.
///
/// The result may fall outside the canvas; `brush_footprint` clamps it.
/// Callers reject non-finite `y` first, since the `as` cast would saturate.
pub fn to_storage_y(height: usize, y: f64) -> i64 {
    (height as f64 - 1.0 - y).floor() as i64
}

/// Cells covered by a brush of radius `k` centered at `(center_x, center_y)`:
/// a square of side `2k + 1`.
///
/// Low and high bounds on each axis are clamped into the canvas separately,
/// so a center far off the canvas still paints a strip along the nearest
/// edge. Returns `None` for an empty canvas.
pub fn brush_footprint(
    center_x: i64,
    center_y: i64,
    k: usize,
    width: usize,
    height: usize,
) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
    if width == 0 || height == 0 {
        return None;
    }
    let k = k as i64;
    let clamp_axis = |value: i64, len: usize| value.clamp(0, len as i64 - 1) as usize;
    let xs = clamp_axis(center_x.saturating_sub(k), width)
        ..=clamp_axis(center_x.saturating_add(k), width);
    let ys = clamp_axis(center_y.saturating_sub(k), height)
        ..=clamp_axis(center_y.saturating_add(k), height);
    Some((xs, ys))
}

/// `y = slope * x + intercept` in mathematical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    /// The line through `p0` and `p1`.
    ///
    /// When both points share an `x` the true line is vertical; the slope is
    /// replaced by `steep_slope` (the canvas passes its height) and the result
    /// is a very steep line through `p0`, not a vertical one. The intercept is
    /// rounded half-to-even to a whole number.
    pub fn through(p0: (f64, f64), p1: (f64, f64), steep_slope: f64) -> Self {
        let (x0, y0) = p0;
        let (x1, y1) = p1;
        let slope = if x1 == x0 {
            steep_slope
        } else {
            (y1 - y0) / (x1 - x0)
        };
        let intercept = (y0 - slope * x0).round_ties_even();
        Line { slope, intercept }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn storage_y_flips_and_floors() {
        assert_eq!(to_storage_y(4, 0.0), 3);
        assert_eq!(to_storage_y(4, 3.0), 0);
        assert_eq!(to_storage_y(4, 1.5), 1);
        assert_eq!(to_storage_y(4, 5.0), -2);
    }

    #[test]
    fn footprint_is_square_of_side_two_k_plus_one() {
        let (xs, ys) = brush_footprint(5, 5, 2, 20, 20).unwrap();
        assert_eq!(xs, 3..=7);
        assert_eq!(ys, 3..=7);
    }

    #[test]
    fn footprint_clamps_axes_independently() {
        let (xs, ys) = brush_footprint(0, 9, 1, 10, 10).unwrap();
        assert_eq!(xs, 0..=1);
        assert_eq!(ys, 8..=9);

        // Far off the top edge: both bounds clamp to row 0.
        let (_, ys) = brush_footprint(3, -50, 1, 10, 10).unwrap();
        assert_eq!(ys, 0..=0);
    }

    #[test]
    fn footprint_of_empty_canvas_is_none() {
        assert!(brush_footprint(0, 0, 0, 0, 5).is_none());
    }

    #[test]
    fn line_through_two_points() {
        let line = Line::through((0.0, 1.0), (2.0, 5.0), 100.0);
        assert_eq!(line.slope, 2.0);
        assert_eq!(line.intercept, 1.0);
        assert_eq!(line.eval(3.0), 7.0);
    }

    #[test]
    fn equal_x_uses_steep_slope() {
        let line = Line::through((2.0, 1.0), (2.0, 9.0), 50.0);
        assert_eq!(line.slope, 50.0);
        assert_eq!(line.intercept, -99.0);
    }

    #[test]
    fn intercept_rounds_half_to_even() {
        // slope 0.5 through (1, 3): intercept 2.5 rounds to 2.
        let line = Line::through((1.0, 3.0), (3.0, 4.0), 10.0);
        assert_eq!(line.intercept, 2.0);
        // slope 0.5 through (1, 4): intercept 3.5 rounds to 4.
        let line = Line::through((1.0, 4.0), (3.0, 5.0), 10.0);
        assert_eq!(line.intercept, 4.0);
    }
}
