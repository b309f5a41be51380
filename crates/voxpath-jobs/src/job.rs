//! Job identity, lifecycle states and the completion record handed to
//! callbacks.

use std::fmt;

use voxpath_core::Point3;
use voxpath_paths::SearchOutcome;

use crate::cancel::CancelToken;

/// Identifier assigned at submission, unique per scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub(crate) u64);

impl JobId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// Where a job is in its lifecycle. Delivered jobs are forgotten.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobState {
    /// Queued, waiting for a free slot.
    Pending,
    /// Handed to a worker.
    Running,
    /// Finished, waiting for the next scheduling pass to deliver it.
    Done,
}

/// How a job ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// A path was found (possibly empty when start == target).
    Found,
    /// The target cannot be reached.
    Unreachable,
    /// Cancelled before or during the search.
    Cancelled,
    /// The worker failed while searching.
    Faulted,
}

/// What a callback receives, exactly once per submitted job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub id: JobId,
    pub start: Point3,
    pub target: Point3,
    pub status: JobStatus,
    /// Start exclusive, target inclusive. Empty unless `status` is `Found`.
    pub path: Vec<Point3>,
}

impl Completion {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == JobStatus::Found
    }
}

/// Result a worker reports back for one job.
#[derive(Debug)]
pub(crate) enum WorkOutcome {
    Search(SearchOutcome),
    Faulted(String),
}

impl WorkOutcome {
    pub(crate) fn into_status_and_path(self) -> (JobStatus, Vec<Point3>) {
        match self {
            Self::Search(SearchOutcome::Found(path)) => (JobStatus::Found, path),
            Self::Search(SearchOutcome::Unreachable) => (JobStatus::Unreachable, Vec::new()),
            Self::Search(SearchOutcome::Cancelled) => (JobStatus::Cancelled, Vec::new()),
            Self::Faulted(_) => (JobStatus::Faulted, Vec::new()),
        }
    }
}

/// Caller-side handle to a submitted job.
#[derive(Clone, Debug)]
pub struct JobHandle {
    id: JobId,
    cancel: CancelToken,
}

impl JobHandle {
    pub(crate) fn new(id: JobId, cancel: CancelToken) -> Self {
        Self { id, cancel }
    }

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Request best-effort cancellation. A pending job is delivered as
    /// cancelled without running; a running search stops at its next
    /// expansion. A job that already finished is unaffected.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
