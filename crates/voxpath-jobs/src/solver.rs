use std::sync::atomic::AtomicBool;

use voxpath_core::GridIndex;
use voxpath_paths::{PathSearch, SearchOutcome, SearchSpace};

/// What a worker runs for each job.
///
/// Implementations must poll `cancel` if they can take long. A panic is
/// caught by the worker and reported as a faulted job.
pub trait PathSolver: Send + Sync + 'static {
    fn solve(
        &self,
        search: &PathSearch,
        grid: &GridIndex,
        space: &mut SearchSpace,
        cancel: &AtomicBool,
    ) -> SearchOutcome;
}

/// The default solver: voxel A*.
#[derive(Copy, Clone, Debug, Default)]
pub struct AstarSolver;

impl PathSolver for AstarSolver {
    fn solve(
        &self,
        search: &PathSearch,
        grid: &GridIndex,
        space: &mut SearchSpace,
        cancel: &AtomicBool,
    ) -> SearchOutcome {
        search.find_path_cancelable(grid, space, cancel)
    }
}
