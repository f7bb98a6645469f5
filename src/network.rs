//! Network aggregate: the ordered mirror population and its link set.
//!
//! The mirror sequence is the chain order every topology computation uses.
//! Both collections are append-only: removal flips lifecycle flags, it never
//! deletes an entry, so positions and identifiers stay stable for the whole
//! run.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::id::IdGenerator;
use crate::link::Link;
use crate::mirror::Mirror;

/// The aggregate a topology strategy operates on.
pub struct Network {
    /// Ordered mirror population; index is the chain position.
    mirrors: Vec<Mirror>,
    /// Links keyed by identifier; closing never removes an entry.
    links: BTreeMap<u64, Link>,
    /// Mirror identifier to chain position.
    positions: HashMap<u64, usize>,
    num_target_mirrors: usize,
    num_target_links_per_mirror: usize,
    ids: Arc<IdGenerator>,
    rng: StdRng,
}

impl Network {
    /// Creates a network with `num_mirrors` initial mirrors at sim time 0.
    ///
    /// The issuer is shared so that several networks (or the driver itself)
    /// can draw from one identifier space.
    pub fn new(
        num_mirrors: usize,
        num_target_mirrors: usize,
        num_target_links_per_mirror: usize,
        config: &SimConfig,
        ids: Arc<IdGenerator>,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut network = Self {
            mirrors: Vec::with_capacity(num_mirrors),
            links: BTreeMap::new(),
            positions: HashMap::new(),
            num_target_mirrors,
            num_target_links_per_mirror,
            ids,
            rng: StdRng::seed_from_u64(seed),
        };
        for _ in 0..num_mirrors {
            network.add_mirror(0, config);
        }
        network
    }

    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    pub fn links(&self) -> &BTreeMap<u64, Link> {
        &self.links
    }

    pub fn num_target_mirrors(&self) -> usize {
        self.num_target_mirrors
    }

    pub fn num_target_links_per_mirror(&self) -> usize {
        self.num_target_links_per_mirror
    }

    /// The identifier issuer this network allocates from.
    pub fn issuer(&self) -> &IdGenerator {
        &self.ids
    }

    /// Chain position of a mirror, or `None` for an unknown identifier.
    pub fn position_of(&self, mirror_id: u64) -> Option<usize> {
        self.positions.get(&mirror_id).copied()
    }

    /// Appends a fresh mirror at `sim_time` and returns its identifier.
    pub fn add_mirror(&mut self, sim_time: u64, config: &SimConfig) -> u64 {
        let id = self.ids.next_id();
        let mirror = Mirror::new(id, sim_time, config, &mut self.rng);
        debug!("adding {} at position {}", mirror, self.mirrors.len());
        self.positions.insert(id, self.mirrors.len());
        self.mirrors.push(mirror);
        id
    }

    /// Inserts a link and registers it on both endpoint mirrors.
    pub fn add_link(&mut self, link: Link) {
        if let Some(&pos) = self.positions.get(&link.source()) {
            self.mirrors[pos].register_link(link.id());
        }
        if let Some(&pos) = self.positions.get(&link.target()) {
            self.mirrors[pos].register_link(link.id());
        }
        self.links.insert(link.id(), link);
    }

    /// Inserts a batch of links, preserving their order.
    pub fn add_links(&mut self, links: Vec<Link>) {
        for link in links {
            self.add_link(link);
        }
    }

    /// Number of links incident to `mirror_id` that are still open.
    pub fn num_non_closed_links(&self, mirror_id: u64) -> usize {
        let Some(&pos) = self.positions.get(&mirror_id) else {
            return 0;
        };
        self.mirrors[pos]
            .links()
            .iter()
            .filter(|&&id| self.links.get(&id).is_some_and(|l| !l.is_closed()))
            .count()
    }

    /// Number of links in the collection that are still open.
    pub fn num_active_links(&self) -> usize {
        self.links.values().filter(|l| !l.is_closed()).count()
    }

    /// Closes every link in the collection. Entries are kept.
    pub fn shutdown_all_links(&mut self) {
        for link in self.links.values_mut() {
            link.shutdown();
        }
    }

    /// Transitions the mirror at `position` to stopping and closes every
    /// link incident to it.
    pub fn shutdown_mirror(&mut self, position: usize, sim_time: u64) {
        let mirror = &mut self.mirrors[position];
        mirror.shutdown(sim_time);
        let incident: Vec<u64> = mirror.links().to_vec();
        for link_id in incident {
            if let Some(link) = self.links.get_mut(&link_id) {
                link.shutdown();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::MirrorState;
    use crate::topology::TopologyKind;

    fn test_config() -> SimConfig {
        SimConfig {
            num_links: None,
            startup_time_min: 5,
            startup_time_max: 10,
            ready_time_min: 20,
            ready_time_max: 40,
            topology: TopologyKind::NextN,
            seed: Some(42),
        }
    }

    fn test_network(num_mirrors: usize) -> Network {
        let config = test_config();
        Network::new(
            num_mirrors,
            num_mirrors,
            2,
            &config,
            Arc::new(IdGenerator::new()),
        )
    }

    #[test]
    fn test_initial_population() {
        let network = test_network(4);
        assert_eq!(network.mirrors().len(), 4);
        assert!(network.links().is_empty());
        for (pos, mirror) in network.mirrors().iter().enumerate() {
            assert_eq!(network.position_of(mirror.id()), Some(pos));
            assert_eq!(mirror.state(), MirrorState::Down);
            assert_eq!(mirror.created_at(), 0);
        }
    }

    #[test]
    fn test_add_link_registers_both_endpoints() {
        let mut network = test_network(3);
        let source = network.mirrors()[0].id();
        let target = network.mirrors()[1].id();
        let link_id = network.issuer().next_id();
        network.add_link(Link::new(link_id, source, target, 0));

        assert_eq!(network.links().len(), 1);
        assert_eq!(network.mirrors()[0].links(), &[link_id]);
        assert_eq!(network.mirrors()[1].links(), &[link_id]);
        assert!(network.mirrors()[2].links().is_empty());
        assert_eq!(network.num_non_closed_links(source), 1);
    }

    #[test]
    fn test_shutdown_mirror_closes_incident_links() {
        let mut network = test_network(3);
        let ids: Vec<u64> = network.mirrors().iter().map(Mirror::id).collect();
        let l0 = network.issuer().next_id();
        let l1 = network.issuer().next_id();
        network.add_link(Link::new(l0, ids[0], ids[1], 0));
        network.add_link(Link::new(l1, ids[1], ids[2], 0));

        network.shutdown_mirror(0, 5);

        assert_eq!(network.mirrors()[0].state(), MirrorState::Stopping);
        assert!(network.links()[&l0].is_closed());
        assert!(!network.links()[&l1].is_closed());
        assert_eq!(network.num_non_closed_links(ids[0]), 0);
        assert_eq!(network.num_non_closed_links(ids[1]), 1);
        // collections never shrink
        assert_eq!(network.mirrors().len(), 3);
        assert_eq!(network.links().len(), 2);
    }

    #[test]
    fn test_seeded_networks_sample_identical_times() {
        let config = test_config();
        let a = Network::new(5, 5, 2, &config, Arc::new(IdGenerator::new()));
        let b = Network::new(5, 5, 2, &config, Arc::new(IdGenerator::new()));
        for (ma, mb) in a.mirrors().iter().zip(b.mirrors()) {
            assert_eq!(ma.startup_time(), mb.startup_time());
            assert_eq!(ma.ready_time(), mb.ready_time());
        }
    }
}
