use std::fmt;

use thiserror::Error;
use voxpath_core::{Extent3, Point3};

/// Which end of a request an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Scheduler errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("invalid scheduler config: {0}")]
    InvalidConfig(String),

    #[error("{endpoint} {point} is outside the {extent} grid")]
    OffGrid {
        endpoint: Endpoint,
        point: Point3,
        extent: Extent3,
    },

    #[error("failed to spawn path worker: {0}")]
    PoolSpawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
