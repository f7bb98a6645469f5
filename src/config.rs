//! Simulation configuration structures and YAML loading.
//!
//! The topology core consumes a small set of keys: an optional per-call
//! fan-out override (`num_links`), the half-open sampling bounds for mirror
//! startup/ready times, the topology strategy to use, and an optional RNG
//! seed for reproducible runs.

use std::fs::File;
use std::path::Path;

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};

use crate::topology::TopologyKind;

/// Simulation configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Per-call fan-out override. When set, topology operations use this
    /// value instead of the network's `num_target_links_per_mirror`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_links: Option<usize>,

    /// Lower bound (inclusive) for sampled mirror startup times.
    pub startup_time_min: u64,
    /// Upper bound (exclusive) for sampled mirror startup times.
    pub startup_time_max: u64,
    /// Lower bound (inclusive) for sampled mirror ready times.
    pub ready_time_min: u64,
    /// Upper bound (exclusive) for sampled mirror ready times.
    pub ready_time_max: u64,

    /// Topology strategy selected for this run.
    #[serde(default)]
    pub topology: TopologyKind,

    /// Seed for the network's timing RNG. Absent means seeded from entropy,
    /// which gives a valid but non-reproducible run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.startup_time_min >= self.startup_time_max {
            return Err(ValidationError::InvalidTiming(format!(
                "startup_time bounds [{}, {}) are empty",
                self.startup_time_min, self.startup_time_max
            )));
        }
        if self.ready_time_min >= self.ready_time_max {
            return Err(ValidationError::InvalidTiming(format!(
                "ready_time bounds [{}, {}) are empty",
                self.ready_time_min, self.ready_time_max
            )));
        }
        if self.num_links == Some(0) {
            return Err(ValidationError::InvalidTopology(
                "num_links override must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid timing configuration: {0}")]
    InvalidTiming(String),
    #[error("Invalid topology configuration: {0}")]
    InvalidTopology(String),
}

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)?;
    let config: SimConfig = serde_yaml::from_reader(file)?;

    config.validate()?;

    info!("Using {:?} topology strategy", config.topology);

    Ok(config)
}
