// src/slices.rs

//! Vertical slices: per-column `y` intervals that get reserved as a unit.
//!
//! Each column `x` maps to an ordered list of `(y_min, y_max)` pairs. Bounds
//! are floored and clamped into `[0, height - 1]` one at a time when a slice
//! is added, and no reordering happens afterwards, so a slice whose bounds
//! were swapped before clamping stays inverted (and reserves nothing).

use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

use crate::error::{CanvasError, Result};

// Fraction of a band's height that a symmetric slice's offset may reach in
// each direction.
const SYMMETRIC_SLICE_RESTRAINT: f64 = 0.4;

/// Inclusive `(y_min, y_max)` pair in storage coordinates.
pub type Slice = (usize, usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerticalSliceSet {
    width: usize,
    height: usize,
    columns: BTreeMap<usize, Vec<Slice>>,
}

impl VerticalSliceSet {
    pub fn new(width: usize, height: usize) -> Self {
        VerticalSliceSet {
            width,
            height,
            columns: BTreeMap::new(),
        }
    }

    /// Slices registered at column `x`, in insertion order.
    pub fn column(&self, x: usize) -> &[Slice] {
        self.columns.get(&x).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All columns in ascending `x` order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Slice])> {
        self.columns.iter().map(|(x, slices)| (*x, slices.as_slice()))
    }

    pub fn slice_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    // The range is checked arithmetically before anything is added, so a
    // bad range adds nothing no matter how long it is.
    fn stepped_columns(
        &self,
        x_min: i64,
        x_max: i64,
        x_step: usize,
    ) -> Result<impl Iterator<Item = usize>> {
        if x_step == 0 {
            return Err(CanvasError::InvalidArgument(
                "x step size must be at least 1".to_string(),
            ));
        }
        let out_of_bounds = |x: i64| CanvasError::ColumnOutOfBounds {
            x,
            width: self.width,
        };
        if x_min >= x_max {
            return Ok((1..=0usize).step_by(x_step));
        }
        if x_min < 0 {
            return Err(out_of_bounds(x_min));
        }

        let (start, step, width) = (x_min as i128, x_step as i128, self.width as i128);
        let last = start + (x_max as i128 - 1 - start) / step * step;
        if last >= width {
            let first_outside = if start >= width {
                start
            } else {
                start + (width - start + step - 1) / step * step
            };
            return Err(out_of_bounds(first_outside as i64));
        }
        Ok(((x_min as usize)..=(last as usize)).step_by(x_step))
    }

    fn clamp_y(&self, y: f64) -> usize {
        let max_y = self.height.saturating_sub(1) as f64;
        // NaN saturates to 0 through the `as` cast.
        y.floor().clamp(0.0, max_y) as usize
    }

    fn push_clamped(&mut self, x: usize, y_min: i64, y_max: i64) {
        let max_y = self.height.saturating_sub(1) as i64;
        let slice = (
            y_min.clamp(0, max_y) as usize,
            y_max.clamp(0, max_y) as usize,
        );
        self.columns.entry(x).or_default().push(slice);
    }

    /// Registers a slice at column `x`, clamping each bound independently.
    pub fn add_slice(&mut self, x: i64, y_min: f64, y_max: f64) -> Result<()> {
        if x < 0 || x as usize >= self.width {
            return Err(CanvasError::ColumnOutOfBounds {
                x,
                width: self.width,
            });
        }
        let slice = (self.clamp_y(y_min), self.clamp_y(y_max));
        self.columns.entry(x as usize).or_default().push(slice);
        Ok(())
    }

    /// For every `x` in `x_min..x_max` stepping by `x_step`, adds one slice
    /// between two independent uniform draws from `[0, height]`.
    pub fn create_random_slices<R: Rng + ?Sized>(
        &mut self,
        x_min: i64,
        x_max: i64,
        x_step: usize,
        rng: &mut R,
    ) -> Result<()> {
        let xs = self.stepped_columns(x_min, x_max, x_step)?;
        let before = self.slice_count();
        for x in xs {
            let a = rng.gen_range(0..=self.height) as i64;
            let b = rng.gen_range(0..=self.height) as i64;
            self.push_clamped(x, a.min(b), a.max(b));
        }
        debug!(
            "Created {} random slices over x in [{}, {})",
            self.slice_count() - before,
            x_min,
            x_max
        );
        Ok(())
    }

    /// Adds slices mirrored around the center of each of `num_partitions`
    /// equal horizontal bands.
    ///
    /// Band height is `height / num_partitions` with integer division, so
    /// any remainder rows at the bottom never get a band. The offset from a
    /// band's center is drawn from `[0, floor(height / num_partitions * 0.4)]`.
    pub fn create_symmetric_slices_from_center<R: Rng + ?Sized>(
        &mut self,
        x_min: i64,
        x_max: i64,
        x_step: usize,
        num_partitions: usize,
        rng: &mut R,
    ) -> Result<()> {
        if num_partitions == 0 {
            return Err(CanvasError::InvalidArgument(
                "symmetric slices need at least one partition".to_string(),
            ));
        }
        let xs: Vec<usize> = self.stepped_columns(x_min, x_max, x_step)?.collect();

        let band_height = self.height / num_partitions;
        let offset_bound = (self.height as f64
            * (1.0 / num_partitions as f64)
            * SYMMETRIC_SLICE_RESTRAINT)
            .floor() as i64;

        let before = self.slice_count();
        for band in 0..num_partitions {
            let center = (band * band_height + band_height / 2) as i64;
            for &x in &xs {
                let offset = rng.gen_range(0..=offset_bound);
                self.push_clamped(x, center - offset, center + offset);
            }
        }
        debug!(
            "Created {} symmetric slices in {} bands (band height {}, max offset {})",
            self.slice_count() - before,
            num_partitions,
            band_height,
            offset_bound
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    #[test]
    fn add_slice_floors_and_clamps_each_bound() {
        let mut slices = VerticalSliceSet::new(10, 20);
        slices.add_slice(3, -4.0, 7.9).unwrap();
        slices.add_slice(3, 12.5, 400.0).unwrap();
        assert_eq!(slices.column(3), &[(0, 7), (12, 19)]);
        assert!(slices.column(4).is_empty());
    }

    #[test]
    fn swapped_bounds_are_not_reordered() {
        let mut slices = VerticalSliceSet::new(4, 10);
        slices.add_slice(0, 8.0, 2.0).unwrap();
        assert_eq!(slices.column(0), &[(8, 2)]);
    }

    #[test]
    fn columns_outside_canvas_are_rejected() {
        let mut slices = VerticalSliceSet::new(4, 10);
        assert_eq!(
            slices.add_slice(4, 0.0, 1.0),
            Err(CanvasError::ColumnOutOfBounds { x: 4, width: 4 })
        );
        assert!(slices.add_slice(-1, 0.0, 1.0).is_err());
        assert!(slices.is_empty());
    }

    #[test]
    fn random_slices_cover_each_stepped_column_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut slices = VerticalSliceSet::new(30, 25);
        slices.create_random_slices(0, 30, 7, &mut rng).unwrap();
        let columns: Vec<usize> = slices.iter().map(|(x, _)| x).collect();
        assert_eq!(columns, vec![0, 7, 14, 21, 28]);
        for (_, column) in slices.iter() {
            assert_eq!(column.len(), 1);
            let (lo, hi) = column[0];
            assert!(lo <= hi);
            assert!(hi <= 24);
        }
    }

    #[test]
    fn symmetric_slices_stay_inside_canvas() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut slices = VerticalSliceSet::new(40, 37);
            slices
                .create_symmetric_slices_from_center(0, 40, 3, 1 + (seed as usize % 5), &mut rng)
                .unwrap();
            for (_, column) in slices.iter() {
                for &(lo, hi) in column {
                    assert!(lo <= 36 && hi <= 36, "slice ({}, {}) escaped", lo, hi);
                    assert!(lo <= hi);
                }
            }
        }
    }

    #[test]
    fn symmetric_slices_are_centered_on_bands() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut slices = VerticalSliceSet::new(2, 100);
        slices
            .create_symmetric_slices_from_center(0, 1, 1, 4, &mut rng)
            .unwrap();
        // Bands of 25 rows centered at 12, 37, 62, 87; offsets at most 10.
        let column = slices.column(0);
        assert_eq!(column.len(), 4);
        for (&(lo, hi), center) in column.iter().zip([12usize, 37, 62, 87]) {
            assert_eq!(center - lo, hi - center);
            assert!(hi - center <= 10);
        }
    }

    #[test]
    fn out_of_canvas_range_adds_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut slices = VerticalSliceSet::new(10, 10);
        assert_eq!(
            slices.create_random_slices(0, 12, 1, &mut rng),
            Err(CanvasError::ColumnOutOfBounds { x: 10, width: 10 })
        );
        assert!(slices.is_empty());
    }

    #[test]
    fn unbounded_range_is_rejected_without_iterating() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut slices = VerticalSliceSet::new(10, 10);
        assert_eq!(
            slices.create_random_slices(0, i64::MAX, 1, &mut rng),
            Err(CanvasError::ColumnOutOfBounds { x: 10, width: 10 })
        );
        assert_eq!(
            slices.create_symmetric_slices_from_center(4, i64::MAX, 3, 2, &mut rng),
            Err(CanvasError::ColumnOutOfBounds { x: 10, width: 10 })
        );
        assert_eq!(
            slices.create_random_slices(i64::MIN, 5, 1, &mut rng),
            Err(CanvasError::ColumnOutOfBounds { x: i64::MIN, width: 10 })
        );
        assert!(slices.is_empty());
    }

    #[test]
    fn stepping_past_the_edge_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut slices = VerticalSliceSet::new(10, 10);
        // Columns 1, 5 and 9; the next step lands past x_max.
        slices.create_random_slices(1, 12, 4, &mut rng).unwrap();
        let columns: Vec<usize> = slices.iter().map(|(x, _)| x).collect();
        assert_eq!(columns, vec![1, 5, 9]);
    }

    #[test]
    fn empty_range_adds_nothing() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut slices = VerticalSliceSet::new(10, 10);
        slices.create_random_slices(7, 7, 1, &mut rng).unwrap();
        slices.create_random_slices(50, 3, 1, &mut rng).unwrap();
        assert!(slices.is_empty());
    }

    #[test]
    fn zero_step_and_zero_partitions_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut slices = VerticalSliceSet::new(10, 10);
        assert!(matches!(
            slices.create_random_slices(0, 10, 0, &mut rng),
            Err(CanvasError::InvalidArgument(_))
        ));
        assert!(matches!(
            slices.create_symmetric_slices_from_center(0, 10, 1, 0, &mut rng),
            Err(CanvasError::InvalidArgument(_))
        ));
    }
}
