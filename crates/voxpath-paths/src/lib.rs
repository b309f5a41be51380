//! A* pathfinding over 3D voxel grids.
//!
//! The search extends classic A* with voxel traversal rules:
//!
//! - **Step down / step up**: a blocked neighbor is replaced by the walkable
//!   cell directly below it, or failing that above it.
//! - **Corner cutting**: horizontal diagonal moves need both orthogonal cells
//!   beside them to be walkable.
//! - **Octile costs**: 10 per orthogonal step, 14 per horizontal diagonal,
//!   used both as edge weight and heuristic.
//!
//! Searches run through a [`SearchSpace`], which owns and reuses all
//! per-search bookkeeping so the grid itself is only ever read.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |
//!
//! [`VoxelPather`] implements all three over a [`voxpath_core::GridIndex`].

mod astar;
mod distance;
mod neighbors;
mod search;
mod space;
mod traits;

pub use distance::{DIAGONAL_COST, ORTHOGONAL_COST, octile, path_cost};
pub use neighbors::{CornerRule, SearchOptions, VoxelPather};
pub use search::{PathSearch, SearchOutcome};
pub use space::SearchSpace;
pub use traits::{AstarPather, Pather, WeightedPather};
