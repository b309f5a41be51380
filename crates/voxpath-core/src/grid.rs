//! The voxel grid: [`GridIndex`] and its shared handle [`SharedGrid`].
//!
//! A `GridIndex` has a fixed extent chosen at construction. Cells are stored
//! in a flat `Vec`, layer by layer (Y outermost, then Z, then X), and looked
//! up with bounds-checked integer coordinates. Off-grid lookups return
//! `None`, which the pathfinder treats as "no traversable cell there".

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::cell::{Cell, CellKind};
use crate::geom::{Extent3, Point3};

/// Errors raised while building a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid extent {0} has a non-positive dimension")]
    EmptyExtent(Extent3),

    #[error("world offset {0:?} must be positive and finite on every axis")]
    InvalidOffset([f32; 3]),
}

/// A grid shared between the construction collaborator and concurrent
/// searches. Searches hold the read guard for their whole run.
pub type SharedGrid = Arc<RwLock<GridIndex>>;

// ---------------------------------------------------------------------------
// GridConfig
// ---------------------------------------------------------------------------

/// Grid dimensions plus the world-space size of one cell on each axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub extent: Extent3,
    pub offset: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: Extent3::new(10, 3, 10),
            offset: [1.0, 1.0, 1.0],
        }
    }
}

impl GridConfig {
    /// Check that the extent is non-empty and offsets are usable divisors.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.extent.is_empty() {
            return Err(GridError::EmptyExtent(self.extent));
        }
        if self.offset.iter().any(|o| !o.is_finite() || *o <= 0.0) {
            return Err(GridError::InvalidOffset(self.offset));
        }
        Ok(())
    }

    /// Convert a continuous world position into cell coordinates by dividing
    /// by the per-axis offset and rounding to the nearest integer (ties to
    /// even). Returns `None` when the result lies off-grid.
    pub fn point_from_world(&self, pos: [f32; 3]) -> Option<Point3> {
        let axis = |i: usize| (pos[i] / self.offset[i]).round_ties_even() as i32;
        let p = Point3::new(axis(0), axis(1), axis(2));
        self.extent.contains(p).then_some(p)
    }

    /// World position of a cell's origin.
    pub fn world_from_point(&self, p: Point3) -> [f32; 3] {
        [
            p.x as f32 * self.offset[0],
            p.y as f32 * self.offset[1],
            p.z as f32 * self.offset[2],
        ]
    }
}

// ---------------------------------------------------------------------------
// GridIndex
// ---------------------------------------------------------------------------

/// Fixed-extent 3D container of [`Cell`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridIndex {
    extent: Extent3,
    cells: Vec<Cell>,
}

impl GridIndex {
    /// Create a grid where every cell is walkable ground. Negative
    /// dimensions are clamped to zero, which yields an empty grid.
    pub fn new(extent: Extent3) -> Self {
        let extent = Extent3::new(extent.x.max(0), extent.y.max(0), extent.z.max(0));
        Self {
            extent,
            cells: extent.iter().map(Cell::new).collect(),
        }
    }

    /// Create a grid where every cell is walkable ground, rejecting empty
    /// extents.
    pub fn try_new(extent: Extent3) -> Result<Self, GridError> {
        Self::from_fn(extent, |c| c)
    }

    /// Build a grid by passing a default cell for every coordinate through
    /// `f`. This is the entry point for whatever derives walkability from
    /// the world.
    pub fn from_fn(extent: Extent3, mut f: impl FnMut(Cell) -> Cell) -> Result<Self, GridError> {
        if extent.is_empty() {
            return Err(GridError::EmptyExtent(extent));
        }
        let mut cells = Vec::with_capacity(extent.len());
        for p in extent.iter() {
            let cell = f(Cell::new(p));
            // Coordinates are fixed once placed; builders only see copies.
            debug_assert_eq!(cell.pos(), p);
            cells.push(cell);
        }
        let grid = Self { extent, cells };
        log::debug!(
            "built {} grid, {} of {} cells walkable",
            extent,
            grid.count_walkable(),
            grid.len()
        );
        Ok(grid)
    }

    /// Wrap the grid into a [`SharedGrid`] handle.
    pub fn into_shared(self) -> SharedGrid {
        Arc::new(RwLock::new(self))
    }

    /// Dimensions of the grid.
    #[inline]
    pub fn extent(&self) -> Extent3 {
        self.extent
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: grids are never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is on the grid.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.extent.contains(p)
    }

    /// Flat index of `p`, or `None` if off-grid.
    #[inline]
    pub fn index(&self, p: Point3) -> Option<usize> {
        self.extent.index(p)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point3 {
        self.cells[idx].pos()
    }

    /// Bounds-checked lookup.
    #[inline]
    pub fn get(&self, p: Point3) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable bounds-checked lookup.
    #[inline]
    pub fn get_mut(&mut self, p: Point3) -> Option<&mut Cell> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Whether the cell at `p` exists and is walkable.
    #[inline]
    pub fn walkable(&self, p: Point3) -> bool {
        self.get(p).is_some_and(|c| c.walkable)
    }

    /// Set walkability at `p`. Does nothing if off-grid.
    pub fn set_walkable(&mut self, p: Point3, walkable: bool) {
        if let Some(c) = self.get_mut(p) {
            c.walkable = walkable;
        }
    }

    /// Set the kind at `p`. Does nothing if off-grid.
    pub fn set_kind(&mut self, p: Point3, kind: CellKind) {
        if let Some(c) = self.get_mut(p) {
            c.kind = kind;
        }
    }

    /// Count walkable cells.
    pub fn count_walkable(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    /// Iterate over all cells in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a GridIndex {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
