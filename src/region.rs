// src/region.rs

//! Rectangular regions and the random bisection that partitions a canvas
//! into them.
//!
//! The canvas starts as a single region. Each successful split picks a
//! region at random, cuts it in half along a random axis, writes the lower
//! (or left) half back into the same slot and appends the other half. The
//! regions therefore always tile the original area without overlap.

use log::trace;
use rand::Rng;

// A region must be at least this wide and tall to be cut in two.
const MIN_SIZE_TO_SPLIT: usize = 2;

/// Axis-aligned rectangle covering `[x_min, x_max) x [y_min, y_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectangularRegion {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl RectangularRegion {
    pub const fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        RectangularRegion {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min)
    }

    pub fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min)
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x_min..self.x_max).contains(&x) && (self.y_min..self.y_max).contains(&y)
    }

    pub fn overlaps(&self, other: &RectangularRegion) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }

    /// Too thin on either axis to be cut into two non-empty halves.
    pub fn is_degenerate(&self) -> bool {
        self.width() < MIN_SIZE_TO_SPLIT || self.height() < MIN_SIZE_TO_SPLIT
    }

    /// Cuts at `x_min + width / 2`, returning `(left, right)`.
    pub fn split_vertically(&self) -> (RectangularRegion, RectangularRegion) {
        let halfway_x = self.x_min + self.width() / 2;
        (
            RectangularRegion::new(self.x_min, halfway_x, self.y_min, self.y_max),
            RectangularRegion::new(halfway_x, self.x_max, self.y_min, self.y_max),
        )
    }

    /// Cuts at `y_min + height / 2`, returning `(lower, upper)` in storage
    /// order (lower `y` first).
    pub fn split_horizontally(&self) -> (RectangularRegion, RectangularRegion) {
        let halfway_y = self.y_min + self.height() / 2;
        (
            RectangularRegion::new(self.x_min, self.x_max, self.y_min, halfway_y),
            RectangularRegion::new(self.x_min, self.x_max, halfway_y, self.y_max),
        )
    }
}

/// Ordered list of regions tiling a canvas.
///
/// Indices are not stable across splits: a split rewrites the chosen slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionList {
    regions: Vec<RectangularRegion>,
}

impl RegionList {
    /// A list holding one region that covers the whole `width x height` area.
    pub fn covering(width: usize, height: usize) -> Self {
        RegionList {
            regions: vec![RectangularRegion::new(0, width, 0, height)],
        }
    }

    pub fn from_regions(regions: Vec<RectangularRegion>) -> Self {
        RegionList { regions }
    }

    pub fn as_slice(&self) -> &[RectangularRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RectangularRegion> {
        self.regions.iter()
    }

    /// Picks a region uniformly at random and bisects it.
    ///
    /// Returns `false` without touching the list when the chosen region is
    /// too small to split (or the list is empty).
    pub fn divide_random_in_two<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.regions.is_empty() {
            return false;
        }

        let index = rng.gen_range(0..self.regions.len());
        let chosen = self.regions[index];
        if chosen.is_degenerate() {
            trace!("Region {:?} too small to split; skipping", chosen);
            return false;
        }

        let (kept, appended) = if rng.gen::<bool>() {
            chosen.split_vertically()
        } else {
            chosen.split_horizontally()
        };

        // Replace in place rather than remove, keeping the update O(1).
        self.regions[index] = kept;
        self.regions.push(appended);
        trace!("Split region {} into {:?} and {:?}", index, kept, appended);
        true
    }
}

impl<'a> IntoIterator for &'a RegionList {
    type Item = &'a RectangularRegion;
    type IntoIter = std::slice::Iter<'a, RectangularRegion>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    fn assert_tiles(list: &RegionList, width: usize, height: usize) {
        let total: usize = list.iter().map(RectangularRegion::area).sum();
        assert_eq!(total, width * height, "regions do not cover the canvas");
        let regions = list.as_slice();
        for (i, a) in regions.iter().enumerate() {
            for b in &regions[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn dimensions_derive_from_edges() {
        let region = RectangularRegion::new(2, 7, 1, 4);
        assert_eq!(region.width(), 5);
        assert_eq!(region.height(), 3);
        assert_eq!(region.area(), 15);
        assert!(region.contains(2, 1));
        assert!(!region.contains(7, 1));
        assert!(!region.contains(2, 4));
    }

    #[test]
    fn splits_cut_at_floor_of_half() {
        let region = RectangularRegion::new(0, 5, 10, 13);
        assert_eq!(
            region.split_vertically(),
            (
                RectangularRegion::new(0, 2, 10, 13),
                RectangularRegion::new(2, 5, 10, 13)
            )
        );
        assert_eq!(
            region.split_horizontally(),
            (
                RectangularRegion::new(0, 5, 10, 11),
                RectangularRegion::new(0, 5, 11, 13)
            )
        );
    }

    #[test]
    fn successful_splits_tile_the_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut list = RegionList::covering(64, 48);
        let mut successes = 0;
        for _ in 0..200 {
            if list.divide_random_in_two(&mut rng) {
                successes += 1;
            }
        }
        assert!(successes > 0);
        assert_eq!(list.len(), successes + 1);
        assert_tiles(&list, 64, 48);
    }

    #[test]
    fn degenerate_regions_are_never_split() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = RegionList::from_regions(vec![
            RectangularRegion::new(0, 1, 0, 10),
            RectangularRegion::new(1, 10, 0, 1),
            RectangularRegion::new(1, 10, 1, 1),
        ]);
        let mut list = original.clone();
        for _ in 0..50 {
            assert!(!list.divide_random_in_two(&mut rng));
        }
        assert_eq!(list, original);
    }

    #[test]
    fn one_pixel_canvas_cannot_be_split() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut list = RegionList::covering(1, 1);
        assert!(!list.divide_random_in_two(&mut rng));
        assert_eq!(list.len(), 1);
    }
}
