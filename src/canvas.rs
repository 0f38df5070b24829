// src/canvas.rs

//! The `Canvas`: a grid of reservable pixels plus the structures used to
//! decide which pixels get which colors.
//!
//! A canvas is built in two phases. During the build phase callers issue any
//! mix of background fills, region splits and fills, function plots, dot
//! connections and slice fills; each reservation overwrites whatever color
//! the cell held before. `finalize` then reads every cell top-to-bottom,
//! left-to-right into a flat RGB buffer for an external encoder.
//!
//! Storage row 0 is the *top* of the image. Plotting works in mathematical
//! coordinates with row 0 at the bottom; see `plot::to_storage_y`.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::error::{CanvasError, Result};
use crate::generator::ColorGenerator;
use crate::pixel::ReservablePixel;
use crate::plot::{self, Dot, Line};
use crate::region::{RectangularRegion, RegionList};
use crate::slices::VerticalSliceSet;

/// Bytes per pixel in the finalized buffer (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Row-major pixel storage.
#[derive(Debug, Clone)]
struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<ReservablePixel>,
}

impl PixelGrid {
    fn new(width: usize, height: usize) -> Self {
        PixelGrid {
            width,
            height,
            cells: vec![ReservablePixel::new(); width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> Option<&ReservablePixel> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Callers guarantee `x < width` and `y < height`.
    fn reserve(&mut self, x: usize, y: usize, color: Color) {
        self.cells[y * self.width + x].reserve(color);
    }

    fn fill(&mut self, color: Color) {
        for cell in &mut self.cells {
            cell.reserve(color);
        }
    }

    fn fill_region(&mut self, region: &RectangularRegion, color: Color) {
        let x_max = region.x_max.min(self.width);
        let y_max = region.y_max.min(self.height);
        for y in region.y_min..y_max {
            for x in region.x_min..x_max {
                self.reserve(x, y, color);
            }
        }
    }
}

/// A procedurally colored image under construction.
///
/// `R` is the entropy source for every randomized operation. Tests inject a
/// seeded generator to get reproducible partitions and slices.
#[derive(Debug, Clone)]
pub struct Canvas<R = StdRng> {
    grid: PixelGrid,
    regions: RegionList,
    slices: VerticalSliceSet,
    dots: Vec<Dot>,
    generator: ColorGenerator,
    rng: R,
}

impl Canvas<StdRng> {
    /// A canvas drawing its randomness from system entropy.
    pub fn new(width: usize, height: usize, generator: ColorGenerator) -> Result<Self> {
        Canvas::with_rng(width, height, generator, StdRng::from_entropy())
    }

    /// A canvas whose random operations are reproducible for a given `seed`.
    pub fn seeded(
        width: usize,
        height: usize,
        generator: ColorGenerator,
        seed: u64,
    ) -> Result<Self> {
        Canvas::with_rng(width, height, generator, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Canvas<R> {
    pub fn with_rng(
        width: usize,
        height: usize,
        generator: ColorGenerator,
        rng: R,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidArgument(format!(
                "canvas dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        debug!("Created {}x{} canvas", width, height);
        Ok(Canvas {
            grid: PixelGrid::new(width, height),
            regions: RegionList::covering(width, height),
            slices: VerticalSliceSet::new(width, height),
            dots: Vec::new(),
            generator,
            rng,
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn regions(&self) -> &RegionList {
        &self.regions
    }

    pub fn slices(&self) -> &VerticalSliceSet {
        &self.slices
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn generator(&self) -> &ColorGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut ColorGenerator {
        &mut self.generator
    }

    /// The cell at storage coordinates `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&ReservablePixel> {
        self.grid.get(x, y)
    }

    /// The reserved color at storage coordinates `(x, y)`.
    pub fn color_at(&self, x: usize, y: usize) -> Result<Color> {
        let pixel = self.grid.get(x, y).ok_or_else(|| {
            CanvasError::InvalidArgument(format!(
                "({}, {}) is outside the {}x{} canvas",
                x,
                y,
                self.width(),
                self.height()
            ))
        })?;
        pixel
            .color()
            .ok_or(CanvasError::UnreservedPixelRead { x, y })
    }

    pub fn is_fully_reserved(&self) -> bool {
        self.grid.cells.iter().all(ReservablePixel::is_reserved)
    }

    // --- Background ---

    pub fn reserve_background(&mut self, color: Color) {
        self.grid.fill(color);
        debug!("Reserved background {}", color);
    }

    pub fn reserve_white_background(&mut self) {
        self.reserve_background(Color::WHITE);
    }

    pub fn reserve_black_background(&mut self) {
        self.reserve_background(Color::BLACK);
    }

    // --- Brush stamping and function plotting ---

    /// Reserves the `(2k + 1)`-sided square centered at storage coordinates
    /// `(center_x, center_y)`, clamped to the canvas. Draws one color from
    /// the generator unless `color` is given.
    pub fn reserve_square(
        &mut self,
        center_x: i64,
        center_y: i64,
        k: usize,
        color: Option<Color>,
    ) -> Result<()> {
        let color = match color {
            Some(color) => color,
            None => self.generator.generate_color()?,
        };
        if let Some((xs, ys)) =
            plot::brush_footprint(center_x, center_y, k, self.width(), self.height())
        {
            for y in ys {
                for x in xs.clone() {
                    self.grid.reserve(x, y, color);
                }
            }
        }
        Ok(())
    }

    /// Plots `f` across every column. `f` receives `x` and returns `y` in
    /// mathematical space.
    ///
    /// Each column gets a brush stamp of radius `brush_size`. Without an
    /// explicit `color`, every stamp draws its own color from the generator.
    /// A NaN or infinite `f(x)` stops the plot with `InvalidArgument`; the
    /// columns before it stay reserved.
    pub fn draw_function<F>(&mut self, f: F, brush_size: usize, color: Option<Color>) -> Result<()>
    where
        F: Fn(f64) -> f64,
    {
        let height = self.height();
        for x in 0..self.width() {
            let value = f(x as f64);
            if !value.is_finite() {
                return Err(CanvasError::InvalidArgument(format!(
                    "function value {} at x = {} cannot be plotted",
                    value, x
                )));
            }
            let y = plot::to_storage_y(height, value);
            self.reserve_square(x as i64, y, brush_size, color)?;
        }
        trace!("Plotted function with brush size {}", brush_size);
        Ok(())
    }

    /// Plots the line through two mathematical-space points. Equal `x`
    /// coordinates yield a line of slope `height` rather than a vertical.
    pub fn connect_points(
        &mut self,
        p0: (f64, f64),
        p1: (f64, f64),
        brush_size: usize,
    ) -> Result<()> {
        let line = Line::through(p0, p1, self.height() as f64);
        trace!("Connecting {:?} -> {:?} via {:?}", p0, p1, line);
        self.draw_function(|x| line.eval(x), brush_size, None)
    }

    // --- Dots ---

    /// Adds a dot at uniformly random coordinates and returns it.
    pub fn add_random_dot(&mut self) -> Dot {
        let dot = (
            self.rng.gen_range(0..self.width()),
            self.rng.gen_range(0..self.height()),
        );
        self.dots.push(dot);
        dot
    }

    /// Draws a line between each consecutive pair of dots, in insertion order.
    pub fn connect_all_dots(&mut self, brush_size: usize) -> Result<()> {
        if self.dots.len() < 2 {
            debug!("Fewer than two dots ({}); nothing to connect", self.dots.len());
            return Ok(());
        }
        for i in 0..self.dots.len() - 1 {
            let (x0, y0) = self.dots[i];
            let (x1, y1) = self.dots[i + 1];
            self.connect_points(
                (x0 as f64, y0 as f64),
                (x1 as f64, y1 as f64),
                brush_size,
            )?;
        }
        debug!("Connected {} dots", self.dots.len());
        Ok(())
    }

    // --- Rectangular regions ---

    /// Bisects one randomly chosen region. Returns `false` if the chosen
    /// region was too small to split.
    pub fn divide_random_region_in_two(&mut self) -> bool {
        self.regions.divide_random_in_two(&mut self.rng)
    }

    /// Fills every region with a single color drawn from the generator.
    pub fn reserve_all_regions(&mut self) -> Result<()> {
        for region in self.regions.iter() {
            let color = self.generator.generate_color()?;
            self.grid.fill_region(region, color);
        }
        debug!("Reserved {} regions", self.regions.len());
        Ok(())
    }

    // --- Vertical slices ---

    /// Registers a slice at column `x`; both bounds are floored and clamped.
    pub fn add_slice(&mut self, x: i64, y_min: f64, y_max: f64) -> Result<()> {
        self.slices.add_slice(x, y_min, y_max)
    }

    pub fn create_random_slices(&mut self, x_min: i64, x_max: i64, x_step: usize) -> Result<()> {
        self.slices
            .create_random_slices(x_min, x_max, x_step, &mut self.rng)
    }

    pub fn create_symmetric_slices_from_center(
        &mut self,
        x_min: i64,
        x_max: i64,
        x_step: usize,
        num_partitions: usize,
    ) -> Result<()> {
        self.slices.create_symmetric_slices_from_center(
            x_min,
            x_max,
            x_step,
            num_partitions,
            &mut self.rng,
        )
    }

    /// Reserves every registered slice with its own generated color. The
    /// upper bound is exclusive: `(y_min, y_max)` covers `y_min..y_max`.
    pub fn reserve_all_slices(&mut self) -> Result<()> {
        for (x, column) in self.slices.iter() {
            for &(y_min, y_max) in column {
                let color = self.generator.generate_color()?;
                for y in y_min..y_max {
                    self.grid.reserve(x, y, color);
                }
            }
        }
        debug!("Reserved {} slices", self.slices.slice_count());
        Ok(())
    }

    // --- Output ---

    /// Flattens the canvas into `width * height * 3` RGB bytes, rows top to
    /// bottom. Fails on the first unreserved pixel without returning any of
    /// the buffer.
    pub fn finalize(&self) -> Result<Vec<u8>> {
        let width = self.width();
        let mut buffer = Vec::with_capacity(self.grid.cells.len() * BYTES_PER_PIXEL);
        for (i, cell) in self.grid.cells.iter().enumerate() {
            let color = cell.color().ok_or(CanvasError::UnreservedPixelRead {
                x: i % width,
                y: i / width,
            })?;
            buffer.extend_from_slice(&color.to_bytes());
        }
        debug!(
            "Finalized {}x{} canvas into {} bytes",
            width,
            self.height(),
            buffer.len()
        );
        Ok(buffer)
    }
}
