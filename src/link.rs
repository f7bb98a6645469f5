//! Link entity: a directed, closable edge between two mirrors.

/// A directed edge from a source mirror to a target mirror.
///
/// The link references both endpoints by identifier but owns neither.
/// Closing never removes a link from the network's collection; it only
/// flips the closed flag.
#[derive(Debug, Clone)]
pub struct Link {
    id: u64,
    source: u64,
    target: u64,
    established_at: u64,
    closed: bool,
}

impl Link {
    /// Creates an open link established at `sim_time`.
    pub fn new(id: u64, source: u64, target: u64, sim_time: u64) -> Self {
        debug_assert_ne!(source, target, "self-loop link {}", id);
        Self {
            id,
            source,
            target,
            established_at: sim_time,
            closed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Identifier of the source mirror.
    pub fn source(&self) -> u64 {
        self.source
    }

    /// Identifier of the target mirror.
    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn established_at(&self) -> u64 {
        self.established_at
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the link. Idempotent: repeated calls leave the link closed.
    pub fn shutdown(&mut self) {
        self.closed = true;
    }
}
