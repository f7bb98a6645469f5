//! Next-N chain topology.
//!
//! Connects each mirror with its next N sequence-neighbors. N comes from the
//! network's `num_target_links_per_mirror` unless the `num_links`
//! configuration key overrides it for the call.
//!
//! The last N mirrors of the chain carry fewer than N outgoing links; this
//! boundary truncation is steady-state behavior, and growth completes the
//! truncated mirrors before the truncation boundary moves to the new tail.

use log::{debug, info};

use crate::config::SimConfig;
use crate::link::Link;
use crate::mirror::Mirror;
use crate::network::Network;
use crate::topology::{TopologyError, TopologyStrategy};

/// Strategy linking each mirror to its next N neighbors in chain order.
pub struct NextNTopology;

impl NextNTopology {
    /// Effective fan-out for one call: the `num_links` override when
    /// configured, otherwise the network's target.
    fn fan_out(network: &Network, config: &SimConfig) -> usize {
        config
            .num_links
            .unwrap_or_else(|| network.num_target_links_per_mirror())
    }
}

impl TopologyStrategy for NextNTopology {
    /// Builds the forward chain: a link from position `i` to `i + j` for
    /// every offset `j` in `1..=N`, skipping targets past the tail.
    ///
    /// With fewer than N+1 mirrors this degrades gracefully and simply
    /// yields fewer links; only growth requires a minimum population.
    fn init_network(
        &self,
        network: &Network,
        config: &SimConfig,
    ) -> Result<Vec<Link>, TopologyError> {
        let mirrors = network.mirrors();
        let num_links = Self::fan_out(network, config);
        let mut ret = Vec::new();

        for i in 0..mirrors.len() {
            for j in 1..=num_links {
                if i + j >= mirrors.len() {
                    continue;
                }
                let source = &mirrors[i];
                let target = &mirrors[i + j];
                ret.push(Link::new(
                    network.issuer().next_id(),
                    source.id(),
                    target.id(),
                    0,
                ));
            }
        }

        debug!(
            "built {} links for {} mirrors (fan-out {})",
            ret.len(),
            mirrors.len(),
            num_links
        );
        Ok(ret)
    }

    /// Appends `count_new` mirrors and stitches the former tail to them.
    ///
    /// The last N pre-existing mirrors form the boundary set: exactly the
    /// mirrors whose outgoing links were truncated at build time. Each gets
    /// N outgoing links, targeting the boundary set itself where the offset
    /// still lands inside it and the new mirrors beyond. The new mirrors
    /// are then chained among themselves by the build rule, moving the
    /// truncation boundary to the new tail.
    fn handle_add_new_mirrors(
        &self,
        network: &mut Network,
        count_new: usize,
        config: &SimConfig,
        sim_time: u64,
    ) -> Result<(), TopologyError> {
        let num_links = Self::fan_out(network, config);
        let num_mirrors = network.mirrors().len();

        if num_links > num_mirrors {
            return Err(TopologyError::FanOutExceedsMirrors {
                num_links,
                num_mirrors,
            });
        }
        if count_new < num_links {
            return Err(TopologyError::TooFewNewMirrors {
                num_links,
                count_new,
            });
        }

        // boundary set: the last N mirrors that existed before the append
        let boundary: Vec<u64> = network.mirrors()[num_mirrors - num_links..]
            .iter()
            .map(Mirror::id)
            .collect();

        let new_ids: Vec<u64> = (0..count_new)
            .map(|_| network.add_mirror(sim_time, config))
            .collect();

        // complete each boundary mirror to N outgoing links
        for i in 0..boundary.len() {
            for j in 1..=num_links {
                let target = if i + j < boundary.len() {
                    boundary[i + j]
                } else {
                    new_ids[i + j - boundary.len()]
                };
                let link = Link::new(network.issuer().next_id(), boundary[i], target, sim_time);
                network.add_link(link);
            }
        }

        // forward chain within the new mirrors, truncated at the new tail
        for i in 0..new_ids.len() {
            for j in 1..=num_links {
                if i + j < new_ids.len() {
                    let link = Link::new(
                        network.issuer().next_id(),
                        new_ids[i],
                        new_ids[i + j],
                        sim_time,
                    );
                    network.add_link(link);
                }
            }
        }

        info!(
            "grew network by {} mirrors at t={} ({} total)",
            count_new,
            sim_time,
            network.mirrors().len()
        );
        Ok(())
    }

    /// Shuts down the first `count_remove` mirrors in chain order and every
    /// link incident to them. Entries stay in their collections; only flags
    /// change. Links shared between two removed mirrors close once, so the
    /// closed-link count may be below `count_remove * N`.
    fn handle_remove_mirrors(
        &self,
        network: &mut Network,
        count_remove: usize,
        _config: &SimConfig,
        sim_time: u64,
    ) -> Result<(), TopologyError> {
        let num_mirrors = network.mirrors().len();
        if count_remove > num_mirrors {
            return Err(TopologyError::RemoveExceedsMirrors {
                count_remove,
                num_mirrors,
            });
        }

        for position in 0..count_remove {
            network.shutdown_mirror(position, sim_time);
        }

        info!(
            "removed {} mirrors at t={} ({} still active)",
            count_remove,
            sim_time,
            num_mirrors - count_remove
        );
        Ok(())
    }

    /// Target link count for a converged network of `num_target_mirrors`
    /// with fan-out N: `M * N - N * (N + 1) / 2`.
    fn num_target_links(&self, network: &Network) -> usize {
        let num_links = network.num_target_links_per_mirror();
        (network.num_target_mirrors() * num_links)
            .saturating_sub(num_links * (num_links + 1) / 2)
    }
}
