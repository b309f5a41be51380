//! Fixed-size worker pool fed through crossbeam channels.
//!
//! Each worker owns one [`SearchSpace`] for its whole life and runs one
//! search at a time. Results travel back on a done channel that only the
//! scheduler reads.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use voxpath_core::SharedGrid;
use voxpath_paths::{PathSearch, SearchOutcome, SearchSpace};

use crate::cancel::CancelToken;
use crate::job::{JobId, WorkOutcome};
use crate::solver::PathSolver;

pub(crate) struct WorkItem {
    pub(crate) id: JobId,
    pub(crate) search: PathSearch,
    pub(crate) cancel: CancelToken,
}

pub(crate) struct WorkDone {
    pub(crate) id: JobId,
    pub(crate) outcome: WorkOutcome,
}

pub(crate) struct WorkerPool {
    tx_job: Option<Sender<WorkItem>>,
    rx_done: Receiver<WorkDone>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub(crate) fn spawn(
        workers: usize,
        grid: SharedGrid,
        solver: Arc<dyn PathSolver>,
    ) -> std::io::Result<Self> {
        let (tx_job, rx_job) = crossbeam_channel::unbounded::<WorkItem>();
        let (tx_done, rx_done) = crossbeam_channel::unbounded::<WorkDone>();

        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let grid = grid.clone();
            let solver = solver.clone();
            let rx_job = rx_job.clone();
            let tx_done = tx_done.clone();
            let handle = thread::Builder::new()
                .name(format!("path-worker-{i}"))
                .spawn(move || worker_loop(grid, solver, rx_job, tx_done))?;
            handles.push(handle);
        }
        log::debug!("spawned {} path workers", workers);

        Ok(Self {
            tx_job: Some(tx_job),
            rx_done,
            handles,
        })
    }

    /// Queue a job for the next free worker. Hands the item back if every
    /// worker is gone.
    pub(crate) fn submit(&self, item: WorkItem) -> Result<(), WorkItem> {
        match &self.tx_job {
            Some(tx) => tx.send(item).map_err(|e| e.into_inner()),
            None => Err(item),
        }
    }

    /// Non-blocking poll for a finished job.
    pub(crate) fn try_recv(&self) -> Result<WorkDone, TryRecvError> {
        self.rx_done.try_recv()
    }

    /// Block until a job finishes or every worker is gone.
    pub(crate) fn recv(&self) -> Option<WorkDone> {
        self.rx_done.recv().ok()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the job channel ends every worker loop.
        self.tx_job.take();
        for h in self.handles.drain(..) {
            if h.join().is_err() {
                log::warn!("path worker exited by panic");
            }
        }
    }
}

fn worker_loop(
    grid: SharedGrid,
    solver: Arc<dyn PathSolver>,
    rx_job: Receiver<WorkItem>,
    tx_done: Sender<WorkDone>,
) {
    let mut scratch: Option<SearchSpace> = None;

    while let Ok(item) = rx_job.recv() {
        let t_start = Instant::now();

        let outcome = if item.cancel.is_cancelled() {
            WorkOutcome::Search(SearchOutcome::Cancelled)
        } else {
            // Walkability stays fixed while the read guard is held.
            let grid = grid.read();
            let space = scratch.get_or_insert_with(|| SearchSpace::new(grid.extent()));
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                solver.solve(&item.search, &grid, space, item.cancel.flag())
            }));
            match result {
                Ok(outcome) => WorkOutcome::Search(outcome),
                Err(payload) => {
                    // The space may be half-written; start clean next time.
                    scratch = None;
                    WorkOutcome::Faulted(panic_message(payload.as_ref()))
                }
            }
        };

        log::debug!(
            "{} finished in {:.2} ms",
            item.id,
            t_start.elapsed().as_secs_f64() * 1000.0
        );

        if tx_done
            .send(WorkDone {
                id: item.id,
                outcome,
            })
            .is_err()
        {
            break;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
