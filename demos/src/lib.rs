//! Shared setup for the voxpath demos.
//!
//! Demonstrates: seeded terrain generation, world-to-cell conversion, many
//! agents requesting the same path through the bounded scheduler, and a
//! layer-by-layer text rendering of the result.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxpath_core::{CellKind, Extent3, GridConfig, GridError, GridIndex, Point3};
use voxpath_jobs::{Completion, JobScheduler, JobStatus, SchedulerConfig, SchedulerError};
use voxpath_paths::path_cost;

/// Cell blocked on every generated terrain, so paths visibly route around it.
pub const AVOIDANCE_CELL: Point3 = Point3::new(1, 0, 1);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Terrain generation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u64,
    /// Chance in `[0, 1]` that a column carries a pillar.
    pub pillar_density: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pillar_density: 0.2,
        }
    }
}

/// Demo configuration, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub grid: GridConfig,
    pub scheduler: SchedulerConfig,
    pub terrain: TerrainConfig,

    /// Number of identical path requests to submit.
    pub agents: usize,

    /// World-space start position.
    pub start: [f32; 3],

    /// World-space end position.
    pub end: [f32; 3],

    /// Pause between scheduling passes, in milliseconds.
    pub tick_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            scheduler: SchedulerConfig::default(),
            terrain: TerrainConfig::default(),
            agents: 5,
            start: [0.0, 0.0, 0.0],
            end: [9.0, 0.0, 9.0],
            tick_ms: 16,
        }
    }
}

#[derive(Error, Debug)]
pub enum DemoError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("{which} position {pos:?} maps outside the grid")]
    OffGrid { which: &'static str, pos: [f32; 3] },

    #[error("pillar_density must lie in [0, 1], got {0}")]
    Density(f64),
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Generate a terrain of `extent`.
///
/// Every cell starts walkable. Each column then rolls for a pillar of random
/// height that blocks the cells it fills; the cell on top of a pillar stays
/// walkable as ground, so stepping can climb it. [`AVOIDANCE_CELL`] is
/// blocked, and finally every point in `keep_clear` is forced walkable.
pub fn build_terrain(
    extent: Extent3,
    terrain: &TerrainConfig,
    keep_clear: &[Point3],
) -> Result<GridIndex, DemoError> {
    if !(0.0..=1.0).contains(&terrain.pillar_density) {
        return Err(DemoError::Density(terrain.pillar_density));
    }
    let mut rng = StdRng::seed_from_u64(terrain.seed);

    // Pillar height per column, indexed z * width + x.
    let mut heights = vec![0; (extent.x * extent.z).max(0) as usize];
    for h in heights.iter_mut() {
        let r: f64 = rng.random();
        if r < terrain.pillar_density {
            *h = rng.random_range(1..=extent.y);
        }
    }

    let mut grid = GridIndex::from_fn(extent, |cell| {
        let p = cell.pos();
        let height = heights[(p.z * extent.x + p.x) as usize];
        let kind = if p.y <= height {
            CellKind::Ground
        } else {
            CellKind::Air
        };
        cell.with_walkable(p.y >= height).with_kind(kind)
    })?;

    grid.set_walkable(AVOIDANCE_CELL, false);
    for &p in keep_clear {
        grid.set_walkable(p, true);
    }
    log::info!(
        "terrain {} (seed {}): {} of {} cells walkable",
        extent,
        terrain.seed,
        grid.count_walkable(),
        grid.len()
    );
    Ok(grid)
}

/// Render the grid one Y layer at a time, bottom first. `#` is blocked,
/// `.` walkable, `*` a path cell, `S` and `E` the endpoints.
pub fn render_layers(grid: &GridIndex, start: Point3, end: Point3, path: &[Point3]) -> String {
    let extent = grid.extent();
    let mut out = String::new();
    for y in 0..extent.y {
        let _ = writeln!(out, "y = {y}");
        for z in 0..extent.z {
            for x in 0..extent.x {
                let p = Point3::new(x, y, z);
                let ch = if p == start {
                    'S'
                } else if p == end {
                    'E'
                } else if path.contains(&p) {
                    '*'
                } else if grid.walkable(p) {
                    '.'
                } else {
                    '#'
                };
                out.push(ch);
            }
            out.push('\n');
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Tally of one demo run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub start: Point3,
    pub end: Point3,
    pub found: usize,
    pub unreachable: usize,
    pub cancelled: usize,
    pub faulted: usize,
    /// Shortest path delivered, if any.
    pub best_path: Option<Vec<Point3>>,
    /// Scheduling passes until idle.
    pub ticks: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, c: Completion) {
        match c.status {
            JobStatus::Found => {
                self.found += 1;
                let shorter = self
                    .best_path
                    .as_ref()
                    .is_none_or(|best| c.path.len() < best.len());
                if shorter {
                    self.best_path = Some(c.path);
                }
            }
            JobStatus::Unreachable => self.unreachable += 1,
            JobStatus::Cancelled => self.cancelled += 1,
            JobStatus::Faulted => self.faulted += 1,
        }
    }
}

/// Build the terrain, submit `config.agents` identical requests and drive
/// the scheduler until every callback has fired.
pub fn run(config: &DemoConfig) -> Result<(GridIndex, RunSummary), DemoError> {
    config.grid.validate()?;
    let start = config
        .grid
        .point_from_world(config.start)
        .ok_or(DemoError::OffGrid {
            which: "start",
            pos: config.start,
        })?;
    let end = config
        .grid
        .point_from_world(config.end)
        .ok_or(DemoError::OffGrid {
            which: "end",
            pos: config.end,
        })?;

    let grid = build_terrain(config.grid.extent, &config.terrain, &[start, end])?;
    let shared = grid.clone().into_shared();
    let mut scheduler = JobScheduler::new(shared, config.scheduler.clone())?;

    let completions = Rc::new(RefCell::new(Vec::new()));
    for _ in 0..config.agents {
        let completions = completions.clone();
        scheduler.submit(start, end, move |c: Completion| {
            log::info!(
                "{}: {:?}, {} steps, cost {}",
                c.id,
                c.status,
                c.path.len(),
                path_cost(c.start, &c.path)
            );
            completions.borrow_mut().push(c);
        })?;
    }

    let t0 = Instant::now();
    let interval = Duration::from_millis(config.tick_ms);
    let mut summary = RunSummary {
        start,
        end,
        ..RunSummary::default()
    };
    loop {
        scheduler.tick();
        summary.ticks += 1;
        log::trace!(
            "tick {}: {} running, {} pending",
            summary.ticks,
            scheduler.running_len(),
            scheduler.pending_len()
        );
        if scheduler.is_idle() {
            break;
        }
        thread::sleep(interval);
    }
    summary.elapsed = t0.elapsed();

    for c in completions.borrow_mut().drain(..) {
        summary.record(c);
    }
    Ok((grid, summary))
}
