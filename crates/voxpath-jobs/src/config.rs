//! Scheduler configuration section.

use serde::{Deserialize, Serialize};
use voxpath_paths::SearchOptions;

use crate::error::{Result, SchedulerError};

/// Scheduler settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Upper bound on searches running at once; further requests queue FIFO.
    pub max_concurrent_jobs: usize,

    /// Worker threads in the pool (defaults to `max_concurrent_jobs`). Must
    /// be at least `max_concurrent_jobs`, so every running job has a worker.
    pub workers: Option<usize>,

    /// Neighbor rule used by requests that do not override it.
    pub search: SearchOptions,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 3,
            workers: None,
            search: SearchOptions::default(),
        }
    }
}

impl SchedulerConfig {
    /// Config with the given concurrency cap and defaults elsewhere.
    pub fn with_max_jobs(max_concurrent_jobs: usize) -> Self {
        Self {
            max_concurrent_jobs,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_jobs == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max_concurrent_jobs must be at least 1".into(),
            ));
        }
        if self.worker_count() < self.max_concurrent_jobs {
            return Err(SchedulerError::InvalidConfig(format!(
                "workers ({}) must be at least max_concurrent_jobs ({})",
                self.worker_count(),
                self.max_concurrent_jobs
            )));
        }
        Ok(())
    }

    /// Number of pool threads to spawn.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or(self.max_concurrent_jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = SchedulerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.worker_count(), 3);
    }

    #[test]
    fn zero_caps_rejected() {
        assert!(SchedulerConfig::with_max_jobs(0).validate().is_err());
        let cfg = SchedulerConfig {
            workers: Some(0),
            ..SchedulerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SchedulerError::InvalidConfig(_))));
    }

    #[test]
    fn fewer_workers_than_slots_rejected() {
        let cfg = SchedulerConfig {
            max_concurrent_jobs: 4,
            workers: Some(2),
            ..SchedulerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SchedulerError::InvalidConfig(_))));

        let cfg = SchedulerConfig {
            workers: Some(6),
            ..cfg
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.worker_count(), 6);
    }

    #[test]
    fn deserialize_partial() {
        let cfg: SchedulerConfig =
            serde_json::from_str(r#"{"max_concurrent_jobs":8,"search":{"vertical":false}}"#).unwrap();
        assert_eq!(cfg.max_concurrent_jobs, 8);
        assert_eq!(cfg.worker_count(), 8);
        assert!(!cfg.search.vertical);
        assert!(cfg.search.step);
    }
}
