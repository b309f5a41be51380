use std::sync::atomic::AtomicBool;

use voxpath_core::{GridIndex, Point3};

use crate::SearchSpace;
use crate::distance::path_cost;
use crate::neighbors::{SearchOptions, VoxelPather};

/// Result of one A* run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Path from start (exclusive) to target (inclusive). Empty when start
    /// and target coincide.
    Found(Vec<Point3>),
    /// The open set emptied without reaching the target.
    Unreachable,
    /// The cancel flag was raised before the search finished.
    Cancelled,
}

impl SearchOutcome {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn into_path(self) -> Option<Vec<Point3>> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Short lowercase name, for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Unreachable => "unreachable",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One path request: start, target, and the neighbor rule to search with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSearch {
    pub start: Point3,
    pub target: Point3,
    pub options: SearchOptions,
}

impl PathSearch {
    /// A search with default options (full 3D with stepping).
    pub fn new(start: Point3, target: Point3) -> Self {
        Self::with_options(start, target, SearchOptions::default())
    }

    pub fn with_options(start: Point3, target: Point3, options: SearchOptions) -> Self {
        Self {
            start,
            target,
            options,
        }
    }

    /// Run the search on `grid` using `space` as scratch.
    ///
    /// Returns `None` when the target cannot be reached.
    pub fn find_path(&self, grid: &GridIndex, space: &mut SearchSpace) -> Option<Vec<Point3>> {
        self.run(grid, space, None).into_path()
    }

    /// Like [`find_path`](Self::find_path), but gives up once `cancel` is set.
    pub fn find_path_cancelable(
        &self,
        grid: &GridIndex,
        space: &mut SearchSpace,
        cancel: &AtomicBool,
    ) -> SearchOutcome {
        self.run(grid, space, Some(cancel))
    }

    /// Run the search with a freshly allocated [`SearchSpace`].
    pub fn find_path_uncached(&self, grid: &GridIndex) -> Option<Vec<Point3>> {
        let mut space = SearchSpace::new(grid.extent());
        self.find_path(grid, &mut space)
    }

    /// Octile cost of walking `path` from this search's start.
    pub fn cost_of(&self, path: &[Point3]) -> i32 {
        path_cost(self.start, path)
    }

    fn run(&self, grid: &GridIndex, space: &mut SearchSpace, cancel: Option<&AtomicBool>) -> SearchOutcome {
        space.prepare(grid.extent());
        let pather = VoxelPather::new(grid, self.options);
        space.astar(&pather, self.start, self.target, cancel)
    }
}
