//! Globally unique identifier issuing.
//!
//! Mirrors and links share one identifier space per simulation run. The
//! issuer is created once by the driver and handed to the network explicitly
//! rather than reached through a global singleton, so that parallel
//! simulations can hold independent (or deliberately shared) counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter producing process-wide unique identifiers.
///
/// `next_id` is atomic, so a single generator may be shared across networks
/// running on different threads. The counter is never reset during a run.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a fresh generator starting at identifier 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next unused identifier.
    ///
    /// Exhausting the 64-bit identifier space is a fatal configuration
    /// error; there is no recovery path, so the process panics.
    pub fn next_id(&self) -> u64 {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        assert_ne!(id, u64::MAX, "identifier space exhausted");
        id
    }
}
