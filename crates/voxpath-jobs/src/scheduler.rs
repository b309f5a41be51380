//! The [`JobScheduler`]: accepts path requests, caps how many run at once,
//! and delivers results from the thread that drives it.
//!
//! # Scheduling pass
//!
//! The host calls [`JobScheduler::tick`] on a steady cadence. Each pass
//!
//! 1. collects finished searches from the worker pool and, walking the
//!    running set in dispatch order, removes every finished job and invokes
//!    its callback right there, on the calling thread;
//! 2. while fewer than `max_concurrent_jobs` jobs are running, moves the
//!    oldest pending job to the pool (FIFO).
//!
//! Callbacks therefore never run on a worker thread and need not be `Send`.
//! They run while the scheduler is borrowed and so cannot call back into
//! it; queue follow-up requests through the callback's own state instead.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::TryRecvError;
use voxpath_core::{Extent3, Point3, SharedGrid};
use voxpath_paths::{PathSearch, SearchOptions};

use crate::cancel::CancelToken;
use crate::config::SchedulerConfig;
use crate::error::{Endpoint, Result, SchedulerError};
use crate::job::{Completion, JobHandle, JobId, JobState, JobStatus, WorkOutcome};
use crate::pool::{WorkItem, WorkerPool};
use crate::solver::{AstarSolver, PathSolver};

/// Completion callback, invoked exactly once from [`JobScheduler::tick`].
pub type Callback = Box<dyn FnOnce(Completion)>;

struct Job {
    id: JobId,
    search: PathSearch,
    cancel: CancelToken,
    callback: Callback,
}

impl Job {
    fn deliver(self, status: JobStatus, path: Vec<Point3>) {
        log::debug!("{} delivered: {:?}, {} steps", self.id, status, path.len());
        (self.callback)(Completion {
            id: self.id,
            start: self.search.start,
            target: self.search.target,
            status,
            path,
        });
    }
}

/// Bounded-concurrency path search scheduler.
///
/// Dropping the scheduler cancels every outstanding job and delivers it
/// without waiting: pending jobs and running jobs without a result yet are
/// delivered as `Cancelled`, finished ones with their result. Use
/// [`shutdown`](Self::shutdown) to wait for running searches instead.
pub struct JobScheduler {
    grid: SharedGrid,
    /// Grid extents are fixed at construction; cached so `submit` never
    /// touches the lock.
    extent: Extent3,
    config: SchedulerConfig,
    pending: VecDeque<Job>,
    /// In dispatch order.
    running: Vec<Job>,
    /// Results received from the pool, keyed by job, not yet delivered.
    finished: HashMap<JobId, WorkOutcome>,
    pool: WorkerPool,
    pool_alive: bool,
    next_id: u64,
}

impl JobScheduler {
    /// Create a scheduler running voxel A* on `grid`.
    pub fn new(grid: SharedGrid, config: SchedulerConfig) -> Result<Self> {
        Self::with_solver(grid, config, AstarSolver)
    }

    /// Create a scheduler whose workers run `solver`.
    pub fn with_solver(
        grid: SharedGrid,
        config: SchedulerConfig,
        solver: impl PathSolver,
    ) -> Result<Self> {
        config.validate()?;
        let extent = grid.read().extent();
        let pool = WorkerPool::spawn(config.worker_count(), grid.clone(), Arc::new(solver))?;
        log::debug!(
            "scheduler up: max {} concurrent jobs, {} workers",
            config.max_concurrent_jobs,
            config.worker_count()
        );
        Ok(Self {
            grid,
            extent,
            config,
            pending: VecDeque::new(),
            running: Vec::new(),
            finished: HashMap::new(),
            pool,
            pool_alive: true,
            next_id: 0,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The grid searches read from.
    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    /// Queue a search from `start` to `target` with the configured options.
    ///
    /// Never blocks. Fails fast if either endpoint is off-grid.
    pub fn submit(
        &mut self,
        start: Point3,
        target: Point3,
        callback: impl FnOnce(Completion) + 'static,
    ) -> Result<JobHandle> {
        let options = self.config.search;
        self.submit_with(start, target, options, callback)
    }

    /// Queue a search with per-request neighbor options.
    pub fn submit_with(
        &mut self,
        start: Point3,
        target: Point3,
        options: SearchOptions,
        callback: impl FnOnce(Completion) + 'static,
    ) -> Result<JobHandle> {
        for (endpoint, point) in [(Endpoint::Start, start), (Endpoint::Target, target)] {
            if !self.extent.contains(point) {
                let err = SchedulerError::OffGrid {
                    endpoint,
                    point,
                    extent: self.extent,
                };
                log::warn!("rejected path request: {}", err);
                return Err(err);
            }
        }

        let id = JobId(self.next_id);
        self.next_id += 1;
        let cancel = CancelToken::new();
        self.pending.push_back(Job {
            id,
            search: PathSearch::with_options(start, target, options),
            cancel: cancel.clone(),
            callback: Box::new(callback),
        });
        log::debug!("{} queued: {} -> {}", id, start, target);
        Ok(JobHandle::new(id, cancel))
    }

    /// Run one scheduling pass. Returns the number of callbacks invoked.
    pub fn tick(&mut self) -> usize {
        self.collect_finished();

        let mut delivered = 0;

        let mut i = 0;
        while i < self.running.len() {
            match self.finished.remove(&self.running[i].id) {
                Some(outcome) => {
                    let job = self.running.remove(i);
                    if let WorkOutcome::Faulted(msg) = &outcome {
                        log::warn!("{} faulted: {}", job.id, msg);
                    }
                    let (status, path) = outcome.into_status_and_path();
                    job.deliver(status, path);
                    delivered += 1;
                }
                None => i += 1,
            }
        }

        while self.running.len() < self.config.max_concurrent_jobs {
            let Some(job) = self.pending.pop_front() else {
                break;
            };
            if job.cancel.is_cancelled() {
                job.deliver(JobStatus::Cancelled, Vec::new());
                delivered += 1;
                continue;
            }
            let item = WorkItem {
                id: job.id,
                search: job.search,
                cancel: job.cancel.clone(),
            };
            match self.pool.submit(item) {
                Ok(()) => {
                    log::debug!("{} running", job.id);
                    self.running.push(job);
                }
                Err(_) => {
                    log::warn!("{} faulted: worker pool is gone", job.id);
                    job.deliver(JobStatus::Faulted, Vec::new());
                    delivered += 1;
                }
            }
        }

        delivered
    }

    /// Tick every `poll_interval` until nothing is pending or running.
    /// Returns the number of callbacks invoked.
    pub fn run_until_idle(&mut self, poll_interval: Duration) -> usize {
        let mut delivered = self.tick();
        while !self.is_idle() {
            thread::sleep(poll_interval);
            delivered += self.tick();
        }
        delivered
    }

    /// Cancel everything and deliver every outstanding job, blocking until
    /// running searches have stopped. Returns the number of callbacks
    /// invoked.
    pub fn shutdown(mut self) -> usize {
        for job in self.pending.iter().chain(self.running.iter()) {
            job.cancel.cancel();
        }
        let mut delivered = 0;
        for job in std::mem::take(&mut self.pending) {
            job.deliver(JobStatus::Cancelled, Vec::new());
            delivered += 1;
        }
        while !self.running.is_empty() {
            let all_reported = self
                .running
                .iter()
                .all(|j| self.finished.contains_key(&j.id));
            if !all_reported {
                match self.pool.recv() {
                    Some(done) => {
                        self.finished.insert(done.id, done.outcome);
                    }
                    None => self.fault_unreported(),
                }
                continue;
            }
            delivered += self.tick();
        }
        delivered
    }

    /// Lifecycle state of `id`, or `None` once delivered (or never issued).
    pub fn state(&self, id: JobId) -> Option<JobState> {
        if self.pending.iter().any(|j| j.id == id) {
            return Some(JobState::Pending);
        }
        if self.running.iter().any(|j| j.id == id) {
            return Some(if self.finished.contains_key(&id) {
                JobState::Done
            } else {
                JobState::Running
            });
        }
        None
    }

    /// Jobs waiting for a slot.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Jobs holding a slot, including finished ones not yet delivered.
    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Whether every submitted job has been delivered.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.running.is_empty()
    }

    fn collect_finished(&mut self) {
        if !self.pool_alive {
            return;
        }
        loop {
            match self.pool.try_recv() {
                Ok(done) => {
                    self.finished.insert(done.id, done.outcome);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("worker pool disconnected");
                    self.pool_alive = false;
                    self.fault_unreported();
                    break;
                }
            }
        }
    }

    /// Mark every running job without a result as faulted, so it still gets
    /// delivered.
    fn fault_unreported(&mut self) {
        for job in &self.running {
            self.finished
                .entry(job.id)
                .or_insert_with(|| WorkOutcome::Faulted("worker pool disconnected".into()));
        }
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        if self.is_idle() {
            return;
        }
        for job in self.pending.iter().chain(self.running.iter()) {
            job.cancel.cancel();
        }
        self.collect_finished();
        let pending = std::mem::take(&mut self.pending);
        let running = std::mem::take(&mut self.running);
        log::debug!(
            "scheduler dropped with {} pending, {} running",
            pending.len(),
            running.len()
        );
        for job in running {
            match self.finished.remove(&job.id) {
                Some(outcome) => {
                    let (status, path) = outcome.into_status_and_path();
                    job.deliver(status, path);
                }
                None => job.deliver(JobStatus::Cancelled, Vec::new()),
            }
        }
        for job in pending {
            job.deliver(JobStatus::Cancelled, Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Instant;

    use crossbeam_channel::{Receiver, Sender};
    use voxpath_core::{Extent3, GridIndex};
    use voxpath_paths::{SearchOutcome, SearchSpace};

    const POLL: Duration = Duration::from_millis(1);

    fn open_grid() -> SharedGrid {
        GridIndex::new(Extent3::new(8, 2, 8)).into_shared()
    }

    type Log = Rc<RefCell<Vec<Completion>>>;

    fn recorder(log: &Log) -> impl FnOnce(Completion) + 'static {
        let log = log.clone();
        move |c| log.borrow_mut().push(c)
    }

    /// Tick until `done` holds or a generous deadline passes.
    fn tick_until(s: &mut JobScheduler, mut done: impl FnMut(&JobScheduler) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !done(s) {
            assert!(Instant::now() < deadline, "timed out waiting for scheduler");
            thread::sleep(POLL);
            s.tick();
        }
    }

    /// Blocks each search until the test hands it a token.
    struct GateSolver {
        gate: Receiver<()>,
    }

    impl GateSolver {
        fn new() -> (Self, Sender<()>) {
            let (tx, rx) = crossbeam_channel::unbounded();
            (Self { gate: rx }, tx)
        }
    }

    impl PathSolver for GateSolver {
        fn solve(
            &self,
            search: &PathSearch,
            _grid: &voxpath_core::GridIndex,
            _space: &mut SearchSpace,
            _cancel: &AtomicBool,
        ) -> SearchOutcome {
            let _ = self.gate.recv();
            SearchOutcome::Found(vec![search.target])
        }
    }

    /// Spins until cancelled.
    struct SpinSolver;

    impl PathSolver for SpinSolver {
        fn solve(
            &self,
            _search: &PathSearch,
            _grid: &voxpath_core::GridIndex,
            _space: &mut SearchSpace,
            cancel: &AtomicBool,
        ) -> SearchOutcome {
            while !cancel.load(Ordering::Relaxed) {
                thread::sleep(POLL);
            }
            SearchOutcome::Cancelled
        }
    }

    /// Panics on one target, runs A* otherwise.
    struct FaultySolver {
        bad_target: Point3,
    }

    impl PathSolver for FaultySolver {
        fn solve(
            &self,
            search: &PathSearch,
            grid: &voxpath_core::GridIndex,
            space: &mut SearchSpace,
            cancel: &AtomicBool,
        ) -> SearchOutcome {
            if search.target == self.bad_target {
                panic!("solver blew up");
            }
            AstarSolver.solve(search, grid, space, cancel)
        }
    }

    #[test]
    fn capacity_is_respected_and_every_job_delivered_once() {
        let mut s = JobScheduler::new(open_grid(), SchedulerConfig::with_max_jobs(3)).unwrap();
        let log: Log = Rc::default();
        let mut ids = Vec::new();
        for i in 0..10 {
            let target = Point3::new(7, i % 2, i % 8);
            ids.push(s.submit(Point3::ZERO, target, recorder(&log)).unwrap().id());
        }

        let deadline = Instant::now() + Duration::from_secs(10);
        while !s.is_idle() {
            assert!(Instant::now() < deadline);
            s.tick();
            assert!(s.running_len() <= 3);
            thread::sleep(POLL);
        }

        let log = log.borrow();
        assert_eq!(log.len(), 10);
        let seen: HashSet<JobId> = log.iter().map(|c| c.id).collect();
        assert_eq!(seen, ids.iter().copied().collect());
        assert!(log.iter().all(Completion::is_found));
        for c in log.iter() {
            assert_eq!(c.path.last(), Some(&c.target));
        }
    }

    #[test]
    fn pending_jobs_dispatch_fifo() {
        let (solver, gate) = GateSolver::new();
        let mut s =
            JobScheduler::with_solver(open_grid(), SchedulerConfig::with_max_jobs(3), solver).unwrap();
        let log: Log = Rc::default();
        let ids: Vec<JobId> = (0..6)
            .map(|i| {
                s.submit(Point3::ZERO, Point3::new(i, 0, 1), recorder(&log))
                    .unwrap()
                    .id()
            })
            .collect();

        s.tick();
        for &id in &ids[..3] {
            assert_eq!(s.state(id), Some(JobState::Running));
        }
        for &id in &ids[3..] {
            assert_eq!(s.state(id), Some(JobState::Pending));
        }

        for next in 3..6 {
            gate.send(()).unwrap();
            let before = log.borrow().len();
            tick_until(&mut s, |_| log.borrow().len() > before);
            assert_eq!(s.state(ids[next]), Some(JobState::Running));
            for &id in &ids[next + 1..] {
                assert_eq!(s.state(id), Some(JobState::Pending));
            }
        }

        for _ in 0..3 {
            gate.send(()).unwrap();
        }
        s.run_until_idle(POLL);
        assert_eq!(log.borrow().len(), 6);
    }

    #[test]
    fn single_slot_delivers_in_submission_order() {
        let mut s = JobScheduler::new(open_grid(), SchedulerConfig::with_max_jobs(1)).unwrap();
        let log: Log = Rc::default();
        let ids: Vec<JobId> = (0..5)
            .map(|i| {
                s.submit(Point3::ZERO, Point3::new(i + 1, 0, 3), recorder(&log))
                    .unwrap()
                    .id()
            })
            .collect();
        s.run_until_idle(POLL);
        let order: Vec<JobId> = log.borrow().iter().map(|c| c.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn callbacks_run_on_the_ticking_thread() {
        let mut s = JobScheduler::new(open_grid(), SchedulerConfig::with_max_jobs(2)).unwrap();
        let here = thread::current().id();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for i in 0..4 {
            let seen = seen.clone();
            s.submit(Point3::ZERO, Point3::new(i, 1, 5), move |_| {
                seen.borrow_mut().push(thread::current().id())
            })
            .unwrap();
        }
        s.run_until_idle(POLL);
        assert_eq!(seen.borrow().len(), 4);
        assert!(seen.borrow().iter().all(|&t| t == here));
    }

    #[test]
    fn unreachable_target_is_delivered_not_dropped() {
        let mut grid = GridIndex::new(Extent3::new(4, 1, 4));
        for z in 0..4 {
            grid.set_walkable(Point3::new(2, 0, z), false);
        }
        let mut s = JobScheduler::new(grid.into_shared(), SchedulerConfig::default()).unwrap();
        let log: Log = Rc::default();
        s.submit(Point3::ZERO, Point3::new(3, 0, 3), recorder(&log)).unwrap();
        s.run_until_idle(POLL);
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].status, JobStatus::Unreachable);
        assert!(log[0].path.is_empty());
    }

    #[test]
    fn off_grid_submission_fails_fast() {
        let mut s = JobScheduler::new(open_grid(), SchedulerConfig::default()).unwrap();
        let err = s
            .submit(Point3::ZERO, Point3::new(8, 0, 0), |_| panic!("must not run"))
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::OffGrid {
                endpoint: Endpoint::Target,
                ..
            }
        ));
        let err = s
            .submit(Point3::new(0, -1, 0), Point3::ZERO, |_| panic!("must not run"))
            .unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::OffGrid {
                endpoint: Endpoint::Start,
                ..
            }
        ));
        assert!(s.is_idle());
        assert_eq!(s.tick(), 0);
    }

    #[test]
    fn invalid_config_rejected() {
        let r = JobScheduler::new(open_grid(), SchedulerConfig::with_max_jobs(0));
        assert!(matches!(r, Err(SchedulerError::InvalidConfig(_))));
    }

    #[test]
    fn worker_panic_is_delivered_as_fault() {
        let bad = Point3::new(5, 0, 5);
        let mut s = JobScheduler::with_solver(
            open_grid(),
            SchedulerConfig::with_max_jobs(1),
            FaultySolver { bad_target: bad },
        )
        .unwrap();
        let log: Log = Rc::default();
        s.submit(Point3::ZERO, bad, recorder(&log)).unwrap();
        s.submit(Point3::ZERO, Point3::new(3, 0, 3), recorder(&log)).unwrap();
        s.run_until_idle(POLL);

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].status, JobStatus::Faulted);
        assert!(log[0].path.is_empty());
        // The worker survives the panic and serves the next job.
        assert_eq!(log[1].status, JobStatus::Found);
    }

    #[test]
    fn cancel_running_job() {
        let mut s =
            JobScheduler::with_solver(open_grid(), SchedulerConfig::with_max_jobs(1), SpinSolver)
                .unwrap();
        let log: Log = Rc::default();
        let handle = s.submit(Point3::ZERO, Point3::new(1, 0, 1), recorder(&log)).unwrap();
        s.tick();
        assert_eq!(s.state(handle.id()), Some(JobState::Running));
        handle.cancel();
        s.run_until_idle(POLL);
        assert_eq!(log.borrow()[0].status, JobStatus::Cancelled);
        assert_eq!(s.state(handle.id()), None);
    }

    #[test]
    fn cancel_pending_job_skips_the_pool() {
        let (solver, gate) = GateSolver::new();
        let mut s =
            JobScheduler::with_solver(open_grid(), SchedulerConfig::with_max_jobs(1), solver).unwrap();
        let log: Log = Rc::default();
        let first = s.submit(Point3::ZERO, Point3::new(1, 0, 0), recorder(&log)).unwrap();
        let second = s.submit(Point3::ZERO, Point3::new(2, 0, 0), recorder(&log)).unwrap();
        let third = s.submit(Point3::ZERO, Point3::new(3, 0, 0), recorder(&log)).unwrap();
        s.tick();
        second.cancel();

        gate.send(()).unwrap();
        tick_until(&mut s, |s| s.state(first.id()).is_none());
        // Second was cancelled while queued, so third took the slot.
        assert_eq!(s.state(third.id()), Some(JobState::Running));

        gate.send(()).unwrap();
        s.run_until_idle(POLL);
        let statuses: Vec<(JobId, JobStatus)> =
            log.borrow().iter().map(|c| (c.id, c.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (first.id(), JobStatus::Found),
                (second.id(), JobStatus::Cancelled),
                (third.id(), JobStatus::Found),
            ]
        );
    }

    #[test]
    fn shutdown_delivers_everything() {
        let mut s =
            JobScheduler::with_solver(open_grid(), SchedulerConfig::with_max_jobs(2), SpinSolver)
                .unwrap();
        let log: Log = Rc::default();
        for i in 0..5 {
            s.submit(Point3::ZERO, Point3::new(i, 0, 2), recorder(&log)).unwrap();
        }
        s.tick();
        assert_eq!(s.running_len(), 2);
        assert_eq!(s.shutdown(), 5);
        let log = log.borrow();
        assert_eq!(log.len(), 5);
        assert!(log.iter().all(|c| c.status == JobStatus::Cancelled));
    }

    #[test]
    fn drop_delivers_outstanding_jobs_as_cancelled() {
        let mut s =
            JobScheduler::with_solver(open_grid(), SchedulerConfig::with_max_jobs(2), SpinSolver)
                .unwrap();
        let log: Log = Rc::default();
        for i in 0..5 {
            s.submit(Point3::ZERO, Point3::new(i, 0, 3), recorder(&log)).unwrap();
        }
        s.tick();
        assert_eq!(s.running_len(), 2);
        assert_eq!(s.pending_len(), 3);
        drop(s);

        let log = log.borrow();
        assert_eq!(log.len(), 5);
        let ids: HashSet<JobId> = log.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 5);
        assert!(log.iter().all(|c| c.status == JobStatus::Cancelled));
    }

    #[test]
    fn submit_while_holding_the_write_guard() {
        let grid = open_grid();
        let mut s = JobScheduler::new(grid.clone(), SchedulerConfig::default()).unwrap();
        let log: Log = Rc::default();
        {
            let mut w = grid.write();
            w.set_walkable(Point3::new(4, 0, 4), false);
            s.submit(Point3::ZERO, Point3::new(7, 0, 7), recorder(&log)).unwrap();
            let err = s
                .submit(Point3::ZERO, Point3::new(0, 2, 0), recorder(&log))
                .unwrap_err();
            assert!(matches!(err, SchedulerError::OffGrid { .. }));
        }
        s.run_until_idle(POLL);
        assert_eq!(log.borrow().len(), 1);
        assert!(log.borrow()[0].is_found());
    }

    #[test]
    fn submit_does_not_wait_behind_a_queued_writer() {
        let (solver, gate) = GateSolver::new();
        let grid = open_grid();
        let mut s =
            JobScheduler::with_solver(grid.clone(), SchedulerConfig::with_max_jobs(1), solver)
                .unwrap();
        let log: Log = Rc::default();
        s.submit(Point3::ZERO, Point3::new(3, 0, 3), recorder(&log)).unwrap();
        s.tick();
        // Let the worker take its read guard, then queue a writer behind it.
        thread::sleep(Duration::from_millis(50));
        let writer = {
            let grid = grid.clone();
            thread::spawn(move || grid.write().set_walkable(Point3::new(6, 1, 6), false))
        };
        thread::sleep(Duration::from_millis(50));

        let t0 = Instant::now();
        s.submit(Point3::ZERO, Point3::new(5, 0, 5), recorder(&log)).unwrap();
        assert!(t0.elapsed() < Duration::from_millis(100));

        gate.send(()).unwrap();
        gate.send(()).unwrap();
        s.run_until_idle(POLL);
        writer.join().unwrap();
        assert_eq!(log.borrow().len(), 2);
        assert!(!grid.read().walkable(Point3::new(6, 1, 6)));
    }

    #[test]
    fn per_request_options_override_config() {
        // A raised cell at (1, 1, 0) over a blocked floor: reaching it needs
        // vertical movement.
        let mut grid = GridIndex::new(Extent3::new(2, 2, 1));
        grid.set_walkable(Point3::new(1, 0, 0), false);
        let mut s = JobScheduler::new(grid.into_shared(), SchedulerConfig::default()).unwrap();
        let log: Log = Rc::default();
        let target = Point3::new(1, 1, 0);
        let full = s.submit(Point3::ZERO, target, recorder(&log)).unwrap();
        let flat = SearchOptions {
            vertical: false,
            step: false,
            ..SearchOptions::default()
        };
        let restricted = s
            .submit_with(Point3::ZERO, target, flat, recorder(&log))
            .unwrap();
        s.run_until_idle(POLL);

        let log = log.borrow();
        let status_of = |id: JobId| log.iter().find(|c| c.id == id).map(|c| c.status);
        assert_eq!(status_of(full.id()), Some(JobStatus::Found));
        assert_eq!(status_of(restricted.id()), Some(JobStatus::Unreachable));
    }
}
