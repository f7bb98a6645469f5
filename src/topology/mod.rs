//! Network topology strategies.
//!
//! A strategy builds the directed link graph for a network's current mirror
//! population and maintains it under churn. All strategies satisfy the same
//! contract; the concrete algorithm is selected at configuration time
//! through [`TopologyKind`].

pub mod next_n;

// Re-export key types for easier access
pub use next_n::NextNTopology;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::link::Link;
use crate::network::Network;

/// Errors from topology operations.
///
/// These are precondition violations: the operation fails fast before
/// mutating anything rather than silently truncating or indexing out of
/// range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// Growing needs at least the fan-out's worth of existing mirrors to
    /// form the boundary set.
    #[error("fan-out {num_links} exceeds the {num_mirrors} mirrors available")]
    FanOutExceedsMirrors { num_links: usize, num_mirrors: usize },
    /// Growing by fewer mirrors than the fan-out would leave boundary
    /// stitching without targets.
    #[error("adding {count_new} mirrors is too few for fan-out {num_links}")]
    TooFewNewMirrors { num_links: usize, count_new: usize },
    /// Removal count exceeds the current population.
    #[error("cannot remove {count_remove} mirrors from a network of {num_mirrors}")]
    RemoveExceedsMirrors {
        count_remove: usize,
        num_mirrors: usize,
    },
}

/// Contract every topology strategy satisfies.
///
/// The driver invokes these entry points at four moments: initial build,
/// full restart, mirror-addition churn, and mirror-removal churn, plus a
/// sizing query for monitoring.
pub trait TopologyStrategy {
    /// Computes the complete initial link set for the network's current
    /// mirror population without mutating the network. The caller decides
    /// whether to install the result via [`Network::add_links`].
    fn init_network(
        &self,
        network: &Network,
        config: &SimConfig,
    ) -> Result<Vec<Link>, TopologyError>;

    /// Closes every existing link, then merges a fresh [`Self::init_network`]
    /// result into the collection. Because the collection never shrinks, the
    /// closed originals remain alongside the new links; callers wanting only
    /// active links filter on the closed flag.
    fn restart_network(
        &self,
        network: &mut Network,
        config: &SimConfig,
    ) -> Result<(), TopologyError> {
        network.shutdown_all_links();
        let links = self.init_network(network, config)?;
        network.add_links(links);
        Ok(())
    }

    /// Appends `count_new` mirrors at `sim_time` and adds the links that
    /// stitch them into the topology.
    fn handle_add_new_mirrors(
        &self,
        network: &mut Network,
        count_new: usize,
        config: &SimConfig,
        sim_time: u64,
    ) -> Result<(), TopologyError>;

    /// Marks `count_remove` mirrors (and their incident links) as shut
    /// down. Nothing is removed from the collections.
    fn handle_remove_mirrors(
        &self,
        network: &mut Network,
        count_remove: usize,
        config: &SimConfig,
        sim_time: u64,
    ) -> Result<(), TopologyError>;

    /// Target link count for the network's configured sizing, independent
    /// of the live link collection. Used for convergence monitoring only.
    fn num_target_links(&self, network: &Network) -> usize;
}

/// Topology strategy selected in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TopologyKind {
    /// Chain topology: each mirror links forward to its next N neighbors.
    #[default]
    NextN,
}

impl TopologyKind {
    /// Instantiates the strategy for this kind.
    pub fn strategy(&self) -> Box<dyn TopologyStrategy> {
        match self {
            Self::NextN => Box::new(NextNTopology),
        }
    }
}
