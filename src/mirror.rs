//! Mirror entity and lifecycle state.
//!
//! A mirror is one participant of the simulated replica network. The
//! topology core only exercises the `Down` initial state and the transition
//! to `Stopping`; the remaining transitions belong to the lifecycle driver
//! outside this crate.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::config::SimConfig;

/// Lifecycle state of a mirror.
///
/// Intended chain: `Down → Starting → Ready → Stopping → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorState {
    Down,
    Starting,
    Ready,
    Stopping,
    Stopped,
}

/// A simulated mirror with timing attributes and incident links.
#[derive(Debug, Clone)]
pub struct Mirror {
    id: u64,
    created_at: u64,
    startup_time: u64,
    ready_time: u64,
    state: MirrorState,
    links: Vec<u64>,
}

impl Mirror {
    /// Creates a mirror at `sim_time`, sampling its startup and ready times
    /// once from the configured half-open `[min, max)` bounds.
    ///
    /// The bounds must be non-empty; `SimConfig::validate` guarantees this
    /// for loaded configurations.
    pub fn new<R: Rng>(id: u64, sim_time: u64, config: &SimConfig, rng: &mut R) -> Self {
        Self {
            id,
            created_at: sim_time,
            startup_time: rng.gen_range(config.startup_time_min..config.startup_time_max),
            ready_time: rng.gen_range(config.ready_time_min..config.ready_time_max),
            state: MirrorState::Down,
            links: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Simulated time at which the mirror was created.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn startup_time(&self) -> u64 {
        self.startup_time
    }

    pub fn ready_time(&self) -> u64 {
        self.ready_time
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    /// Identifiers of the links incident to this mirror (either endpoint).
    pub fn links(&self) -> &[u64] {
        &self.links
    }

    pub(crate) fn register_link(&mut self, link_id: u64) {
        self.links.push(link_id);
    }

    /// Transitions the mirror to `Stopping`. Idempotent: repeated calls
    /// re-apply the same target state without error.
    pub fn shutdown(&mut self, sim_time: u64) {
        debug!("mirror {} shutting down at t={}", self.id, sim_time);
        self.state = MirrorState::Stopping;
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mirror {} [{:?}] (startup: {}, ready: {}, links: {})",
            self.id,
            self.state,
            self.startup_time,
            self.ready_time,
            self.links.len()
        )
    }
}
