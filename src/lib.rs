//! # Mirrorsim - Topology maintenance for simulated mirror networks
//!
//! This library models the link topology of a simulated mirror (replica)
//! network whose membership changes over discrete simulated time: mirrors
//! join, become ready, and eventually leave, and the set of directed links
//! between them is (re)computed consistently by a pluggable topology
//! strategy.
//!
//! ## Overview
//!
//! A [`network::Network`] holds an ordered mirror population and an
//! append-only link collection. A [`topology::TopologyStrategy`] builds the
//! initial link graph, extends it when mirrors are appended, and retracts it
//! (by flipping flags, never by deleting entries) when mirrors are removed.
//! The shipped strategy is the next-N chain: each mirror links forward to
//! its next N sequence-neighbors.
//!
//! Mirrors and links draw their identifiers from one shared
//! [`id::IdGenerator`], so a single identifier space covers both entity
//! kinds for the whole run. Mirror startup/ready times are sampled from
//! configured half-open bounds through a seeded RNG, which makes runs fully
//! reproducible.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures and YAML parsing
//! - `id`: Process-wide unique identifier issuing
//! - `mirror`: Mirror entity and lifecycle state machine
//! - `link`: Directed, closable link entity
//! - `network`: The aggregate of mirrors, links, and sizing targets
//! - `topology`: Strategy contract and the next-N chain implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use mirrorsim::config;
//! use mirrorsim::id::IdGenerator;
//! use mirrorsim::network::Network;
//!
//! // Load configuration from YAML file
//! let config = config::load_config(Path::new("sim.yaml"))?;
//!
//! // Build a network of 10 mirrors with a fan-out target of 2
//! let ids = Arc::new(IdGenerator::new());
//! let mut network = Network::new(10, 10, 2, &config, ids);
//!
//! // Install the initial topology and apply churn
//! let strategy = config.topology.strategy();
//! let links = strategy.init_network(&network, &config)?;
//! network.add_links(links);
//! strategy.handle_add_new_mirrors(&mut network, 2, &config, 100)?;
//! strategy.handle_remove_mirrors(&mut network, 1, &config, 200)?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are typed enums built with `thiserror`
//! ([`config::ValidationError`], [`topology::TopologyError`]); the binary
//! boundary uses `color_eyre` for reporting. Precondition violations fail
//! fast before mutating anything; shutdown operations are idempotent and
//! never fail.

pub mod config;
pub mod id;
pub mod link;
pub mod mirror;
pub mod network;
pub mod topology;
