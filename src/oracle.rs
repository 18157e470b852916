//! Minimum-separation checks against the accepted samples.
//!
//! Both oracles reject a candidate iff some sample lies strictly closer than
//! `r_min`, compared on squared distances, so for the same history they give
//! the same verdict. [`SpatialGrid`] only skips samples that cannot be closer
//! than `r_min`.

use crate::domain::Domain;
use crate::error::ValidationError;
use crate::point::Point2D;
use std::f64::consts::SQRT_2;

/// Cells on each side of the candidate's cell that can hold a conflicting sample.
const NEIGHBORHOOD: usize = 2;

/// Largest grid [`SpatialGrid`] will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 26;

pub trait SeparationOracle {
    /// True iff `candidate` is at least `r_min` from every point in `samples`.
    ///
    /// `candidate` must already lie inside the domain the oracle was built for.
    fn accept(&self, candidate: Point2D, samples: &[Point2D]) -> bool;

    /// Called once for each accepted point, with `samples[index] == point`.
    fn record(&mut self, index: usize, point: Point2D);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    BruteForce,
    Grid,
}

/// Linear scan over every accepted sample.
#[derive(Clone, Debug)]
pub struct BruteForce {
    r_min_squared: f64,
}

impl BruteForce {
    pub fn new(r_min: f64) -> Self {
        Self {
            r_min_squared: r_min * r_min,
        }
    }
}

impl SeparationOracle for BruteForce {
    fn accept(&self, candidate: Point2D, samples: &[Point2D]) -> bool {
        samples
            .iter()
            .all(|s| s.distance_squared(candidate) >= self.r_min_squared)
    }

    fn record(&mut self, _index: usize, _point: Point2D) {}
}

/// Background grid with cells of side `r_min / sqrt(2)`.
///
/// A cell's diagonal equals `r_min`, so two separated samples never share a
/// cell and each cell stores at most one sample index. Any sample closer than
/// `r_min` to a candidate lies within two cells of the candidate's cell on
/// both axes.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    origin: Point2D,
    cell_size: f64,
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
    r_min_squared: f64,
}

impl SpatialGrid {
    pub fn new(domain: &Domain, r_min: f64) -> Result<Self, ValidationError> {
        let (width, height) = Self::dimensions_for(domain, r_min)?;

        Ok(Self {
            origin: domain.bounds().0,
            cell_size: r_min / SQRT_2,
            width,
            height,
            cells: vec![None; width * height],
            r_min_squared: r_min * r_min,
        })
    }

    /// Cell counts along x and y for `domain` at separation `r_min`.
    pub fn dimensions_for(domain: &Domain, r_min: f64) -> Result<(usize, usize), ValidationError> {
        let too_large = ValidationError::GridTooLarge {
            r_min,
            limit: MAX_GRID_CELLS,
        };
        let (min, max) = domain.bounds();
        let cell_size = r_min / SQRT_2;

        // floor + 1 so a point sitting on the max edge still maps to a cell
        let cells_along = |span: f64| -> Option<usize> {
            let cells = (span / cell_size).floor();
            if cells.is_finite() && cells >= 0.0 && cells < MAX_GRID_CELLS as f64 {
                (cells as usize).checked_add(1)
            } else {
                None
            }
        };

        let width = cells_along(max.x - min.x).ok_or_else(|| too_large.clone())?;
        let height = cells_along(max.y - min.y).ok_or_else(|| too_large.clone())?;

        match width.checked_mul(height) {
            Some(total) if total <= MAX_GRID_CELLS => Ok((width, height)),
            _ => Err(too_large),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn cell_coords(&self, p: Point2D) -> (usize, usize) {
        let x = ((p.x - self.origin.x) / self.cell_size) as usize;
        let y = ((p.y - self.origin.y) / self.cell_size) as usize;
        (x, y)
    }

    pub fn get(&self, p: Point2D) -> Option<usize> {
        let (x, y) = self.cell_coords(p);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }
}

impl SeparationOracle for SpatialGrid {
    fn accept(&self, candidate: Point2D, samples: &[Point2D]) -> bool {
        debug_assert!(
            candidate.x >= self.origin.x && candidate.y >= self.origin.y,
            "candidate {:?} lies before the grid origin",
            candidate
        );
        let (cx, cy) = self.cell_coords(candidate);
        debug_assert!(
            cx < self.width && cy < self.height,
            "candidate {:?} lies outside the grid",
            candidate
        );
        let x_end = (cx + NEIGHBORHOOD).min(self.width - 1);
        let y_end = (cy + NEIGHBORHOOD).min(self.height - 1);

        for y in cy.saturating_sub(NEIGHBORHOOD)..=y_end {
            let row = y * self.width;
            for x in cx.saturating_sub(NEIGHBORHOOD)..=x_end {
                if let Some(index) = self.cells[row + x] {
                    if samples[index].distance_squared(candidate) < self.r_min_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn record(&mut self, index: usize, point: Point2D) {
        let (x, y) = self.cell_coords(point);
        let cell = &mut self.cells[y * self.width + x];
        debug_assert!(cell.is_none(), "two samples closer than r_min share a cell");
        *cell = Some(index);
    }
}
