#[cfg(test)]
mod next_n_topology_tests {
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    use mirrorsim::config::{load_config, SimConfig};
    use mirrorsim::id::IdGenerator;
    use mirrorsim::mirror::MirrorState;
    use mirrorsim::network::Network;
    use mirrorsim::topology::TopologyKind;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file
    }

    fn scenario_config() -> SimConfig {
        let file = write_config(
            r#"
startup_time_min: 5
startup_time_max: 15
ready_time_min: 30
ready_time_max: 60
topology: NextN
seed: 1234
"#,
        );
        load_config(file.path()).unwrap()
    }

    /// Full driver scenario over the public API: build, converge check,
    /// grow churn, remove churn, restart.
    #[test]
    fn test_full_churn_scenario() {
        let config = scenario_config();
        let ids = Arc::new(IdGenerator::new());
        let mut network = Network::new(10, 10, 2, &config, ids);
        let strategy = config.topology.strategy();

        // initial build converges on the sizing target
        let links = strategy.init_network(&network, &config).unwrap();
        network.add_links(links);
        assert_eq!(strategy.num_target_links(&network), 17);
        assert_eq!(network.links().len(), 17);
        assert_eq!(network.num_active_links(), 17);

        // timing attributes of every mirror respect the configured bounds
        for mirror in network.mirrors() {
            assert!((5..15).contains(&mirror.startup_time()));
            assert!((30..60).contains(&mirror.ready_time()));
        }

        // growth: population extends, identifiers stay unique
        strategy
            .handle_add_new_mirrors(&mut network, 3, &config, 50)
            .unwrap();
        assert_eq!(network.mirrors().len(), 13);
        let mut mirror_ids: Vec<u64> = network.mirrors().iter().map(|m| m.id()).collect();
        mirror_ids.sort_unstable();
        mirror_ids.dedup();
        assert_eq!(mirror_ids.len(), 13);

        // every link points strictly forward in chain order
        for link in network.links().values() {
            let source = network.position_of(link.source()).unwrap();
            let target = network.position_of(link.target()).unwrap();
            assert!(source < target);
        }

        // removal churn: oldest mirrors stop, collections keep their size
        let links_before = network.links().len();
        strategy
            .handle_remove_mirrors(&mut network, 4, &config, 80)
            .unwrap();
        assert_eq!(network.mirrors().len(), 13);
        assert_eq!(network.links().len(), links_before);
        for mirror in &network.mirrors()[..4] {
            assert_eq!(mirror.state(), MirrorState::Stopping);
            assert_eq!(network.num_non_closed_links(mirror.id()), 0);
        }

        // restart: everything closed, a fresh chain layered on top
        strategy.restart_network(&mut network, &config).unwrap();
        let fresh = network.num_active_links();
        assert_eq!(network.links().len(), links_before + fresh);
        // chain over 13 mirrors with fan-out 2
        assert_eq!(fresh, 13 * 2 - 3);
    }

    /// Two runs with the same seed and a fresh issuer each produce the same
    /// topology and the same sampled timings.
    #[test]
    fn test_runs_are_reproducible() {
        let config = scenario_config();
        let build = || {
            let mut network = Network::new(8, 8, 3, &config, Arc::new(IdGenerator::new()));
            let strategy = config.topology.strategy();
            let links = strategy.init_network(&network, &config).unwrap();
            network.add_links(links);
            strategy
                .handle_add_new_mirrors(&mut network, 3, &config, 7)
                .unwrap();
            network
        };

        let a = build();
        let b = build();
        assert_eq!(a.mirrors().len(), b.mirrors().len());
        assert_eq!(a.links().len(), b.links().len());
        for (ma, mb) in a.mirrors().iter().zip(b.mirrors()) {
            assert_eq!(ma.id(), mb.id());
            assert_eq!(ma.startup_time(), mb.startup_time());
            assert_eq!(ma.ready_time(), mb.ready_time());
        }
        for (la, lb) in a.links().values().zip(b.links().values()) {
            assert_eq!(la.id(), lb.id());
            assert_eq!(la.source(), lb.source());
            assert_eq!(la.target(), lb.target());
        }
    }

    /// The `num_links` key overrides the network's fan-out target per call.
    #[test]
    fn test_fan_out_override_from_config() {
        let file = write_config(
            r#"
num_links: 1
startup_time_min: 1
startup_time_max: 2
ready_time_min: 1
ready_time_max: 2
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.topology, TopologyKind::NextN);

        let network = Network::new(6, 6, 3, &config, Arc::new(IdGenerator::new()));
        let strategy = config.topology.strategy();
        let links = strategy.init_network(&network, &config).unwrap();
        // fan-out 1: a plain chain of 5 links, not the 12 the target implies
        assert_eq!(links.len(), 5);
    }
}
