//! The voxel neighbor rule.
//!
//! For every offset of the 3×3×3 neighborhood (or the 3×3 plane when
//! vertical movement is off) a traversable neighbor is resolved as follows:
//!
//! 1. the candidate cell itself, if walkable;
//! 2. otherwise, with stepping enabled, the cell below the candidate
//!    (step down), then the cell above it (step up);
//! 3. otherwise nothing.
//!
//! A resolved neighbor that is a horizontal diagonal of the current cell is
//! then dropped unless both orthogonal cells it would cut past are walkable
//! (see [`CornerRule`]).

use voxpath_core::{GridIndex, Point3};

use crate::distance::octile;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Height at which the two orthogonal cells of a diagonal move are checked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CornerRule {
    /// Check at the current cell's height, also for stepped diagonals.
    #[default]
    CurrentLevel,
    /// Check at the resolved neighbor's height.
    NeighborLevel,
    /// Allow corner cutting.
    Ignore,
}

/// Knobs for the neighbor rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Search the full 3×3×3 neighborhood. When `false` only the
    /// horizontal 8-neighborhood is searched.
    pub vertical: bool,
    /// Fall back to the cell below, then above, a blocked candidate.
    pub step: bool,
    pub corner_rule: CornerRule,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            vertical: true,
            step: true,
            corner_rule: CornerRule::CurrentLevel,
        }
    }
}

impl SearchOptions {
    /// Horizontal 8-connectivity with stepping.
    pub const fn planar() -> Self {
        Self {
            vertical: false,
            step: true,
            corner_rule: CornerRule::CurrentLevel,
        }
    }
}

/// [`AstarPather`] over a [`GridIndex`] using the voxel neighbor rule and
/// octile costs.
#[derive(Copy, Clone, Debug)]
pub struct VoxelPather<'a> {
    grid: &'a GridIndex,
    options: SearchOptions,
}

impl<'a> VoxelPather<'a> {
    pub fn new(grid: &'a GridIndex, options: SearchOptions) -> Self {
        Self { grid, options }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Resolve the traversable neighbor for one candidate position.
    fn resolve(&self, current: Point3, candidate: Point3) -> Option<Point3> {
        let resolved = if self.grid.walkable(candidate) {
            candidate
        } else if !self.options.step {
            return None;
        } else if self.grid.walkable(candidate.below()) {
            candidate.below()
        } else if self.grid.walkable(candidate.above()) {
            candidate.above()
        } else {
            return None;
        };

        // A vertical candidate can step back onto the current cell.
        if resolved == current {
            return None;
        }
        if current.is_horizontal_diagonal(resolved) && !self.corner_clear(current, resolved) {
            return None;
        }
        Some(resolved)
    }

    fn corner_clear(&self, current: Point3, neighbor: Point3) -> bool {
        let y = match self.options.corner_rule {
            CornerRule::CurrentLevel => current.y,
            CornerRule::NeighborLevel => neighbor.y,
            CornerRule::Ignore => return true,
        };
        self.grid.walkable(Point3::new(neighbor.x, y, current.z))
            && self.grid.walkable(Point3::new(current.x, y, neighbor.z))
    }
}

impl Pather for VoxelPather<'_> {
    fn neighbors(&self, p: Point3, buf: &mut Vec<Point3>) {
        let dys: &[i32] = if self.options.vertical { &[-1, 0, 1] } else { &[0] };
        for &dy in dys {
            for dz in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    if let Some(n) = self.resolve(p, p.shift(dx, dy, dz)) {
                        buf.push(n);
                    }
                }
            }
        }
    }
}

impl WeightedPather for VoxelPather<'_> {
    #[inline]
    fn cost(&self, from: Point3, to: Point3) -> i32 {
        octile(from, to)
    }
}

impl AstarPather for VoxelPather<'_> {
    #[inline]
    fn estimate(&self, from: Point3, to: Point3) -> i32 {
        octile(from, to)
    }
}
