//! Many agents requesting the same path through a bounded scheduler.
//!
//! Run: cargo run --bin agents -- --agents 20 --max-jobs 3 --show

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use voxpath_demos::{DemoConfig, render_layers, run};
use voxpath_paths::{CornerRule, path_cost};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum CliCornerRule {
    #[value(name = "current")]
    Current,
    #[value(name = "neighbor")]
    Neighbor,
    #[value(name = "ignore")]
    Ignore,
}

impl From<CliCornerRule> for CornerRule {
    fn from(value: CliCornerRule) -> Self {
        match value {
            CliCornerRule::Current => CornerRule::CurrentLevel,
            CliCornerRule::Neighbor => CornerRule::NeighborLevel,
            CliCornerRule::Ignore => CornerRule::Ignore,
        }
    }
}

/// Voxel A* agents demo
#[derive(Parser, Debug)]
#[command(name = "agents", version, about)]
struct Cli {
    /// TOML config file (defaults to ./voxpath.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of identical path requests
    #[arg(long)]
    agents: Option<usize>,

    /// Maximum searches running at once
    #[arg(long)]
    max_jobs: Option<usize>,

    /// Terrain seed
    #[arg(long)]
    seed: Option<u64>,

    /// Only search the horizontal plane (stepping stays on)
    #[arg(long)]
    planar: bool,

    /// Height at which diagonal corners are checked
    #[arg(long, value_enum)]
    corner: Option<CliCornerRule>,

    /// Print the terrain and the shortest path layer by layer
    #[arg(long)]
    show: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<DemoConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            let cfg = basic_toml::from_str(&contents)?;
            log::info!("Loaded config from {}", path.display());
            Ok(cfg)
        }
        None => {
            if let Ok(contents) = fs::read_to_string("voxpath.toml") {
                match basic_toml::from_str(&contents) {
                    Ok(cfg) => {
                        log::info!("Loaded config from voxpath.toml");
                        return Ok(cfg);
                    }
                    Err(e) => log::warn!("Failed to parse voxpath.toml: {}", e),
                }
            }
            Ok(DemoConfig::default())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(agents) = cli.agents {
        config.agents = agents;
    }
    if let Some(max_jobs) = cli.max_jobs {
        config.scheduler.max_concurrent_jobs = max_jobs;
    }
    if let Some(seed) = cli.seed {
        config.terrain.seed = seed;
    }
    if cli.planar {
        config.scheduler.search.vertical = false;
    }
    if let Some(rule) = cli.corner {
        config.scheduler.search.corner_rule = rule.into();
    }

    let (grid, summary) = run(&config)?;

    log::info!(
        "{} agents from {} to {} in {} ticks ({:.1} ms): {} found, {} unreachable, {} cancelled, {} faulted",
        config.agents,
        summary.start,
        summary.end,
        summary.ticks,
        summary.elapsed.as_secs_f64() * 1000.0,
        summary.found,
        summary.unreachable,
        summary.cancelled,
        summary.faulted
    );
    if let Some(path) = &summary.best_path {
        log::info!(
            "shortest path: {} steps, cost {}",
            path.len(),
            path_cost(summary.start, path)
        );
    }

    if cli.show {
        let path = summary.best_path.as_deref().unwrap_or(&[]);
        print!("{}", render_layers(&grid, summary.start, summary.end, path));
    }
    Ok(())
}
