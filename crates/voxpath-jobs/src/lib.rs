//! Bounded-concurrency scheduling for voxel path searches.
//!
//! A [`JobScheduler`] owns a fixed pool of worker threads that read a
//! [`SharedGrid`](voxpath_core::SharedGrid). Callers submit start/target
//! pairs with a callback; at most `max_concurrent_jobs` searches run at
//! once, the rest wait in FIFO order. Every callback is invoked exactly once,
//! from [`JobScheduler::tick`] on the thread that drives the scheduler.
//!
//! ```no_run
//! use std::time::Duration;
//! use voxpath_core::{Extent3, GridIndex, Point3};
//! use voxpath_jobs::{JobScheduler, SchedulerConfig};
//!
//! let grid = GridIndex::new(Extent3::new(10, 3, 10)).into_shared();
//! let mut scheduler = JobScheduler::new(grid, SchedulerConfig::default())?;
//! scheduler.submit(Point3::ZERO, Point3::new(9, 0, 9), |done| {
//!     println!("{}: {:?}, {} steps", done.id, done.status, done.path.len());
//! })?;
//! scheduler.run_until_idle(Duration::from_millis(5));
//! # Ok::<(), voxpath_jobs::SchedulerError>(())
//! ```

mod cancel;
mod config;
mod error;
mod job;
mod pool;
mod scheduler;
mod solver;

pub use cancel::CancelToken;
pub use config::SchedulerConfig;
pub use error::{Endpoint, Result, SchedulerError};
pub use job::{Completion, JobHandle, JobId, JobState, JobStatus};
pub use scheduler::{Callback, JobScheduler};
pub use solver::{AstarSolver, PathSolver};
