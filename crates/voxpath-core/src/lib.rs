//! **voxpath-core**: core types for pathfinding on voxel grids.
//!
//! This crate provides the geometry primitives, the [`Cell`] type and the
//! fixed-extent [`GridIndex`] that searches read from. Grid construction
//! (deriving walkability from a world) happens outside this crate through
//! [`GridIndex::from_fn`] and the mutation helpers.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellKind};
pub use geom::{Extent3, ExtentIter, Point3};
pub use grid::{GridConfig, GridError, GridIndex, SharedGrid};
