use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use mirrorsim::config;
use mirrorsim::id::IdGenerator;
use mirrorsim::network::Network;

/// Topology construction and churn maintenance for simulated mirror networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Number of mirrors in the initial population
    #[arg(short, long, default_value_t = 10)]
    mirrors: usize,

    /// Target number of mirrors for convergence monitoring (defaults to the
    /// initial population)
    #[arg(long)]
    target_mirrors: Option<usize>,

    /// Target number of outgoing links per mirror (fan-out N)
    #[arg(short, long, default_value_t = 2)]
    links_per_mirror: usize,

    /// Number of mirrors to add as a churn step
    #[arg(long, default_value_t = 0)]
    add: usize,

    /// Number of mirrors to remove as a churn step
    #[arg(long, default_value_t = 0)]
    remove: usize,

    /// Perform a full topology restart after the churn steps
    #[arg(long)]
    restart: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting MirrorSim topology driver");
    info!("Configuration file: {:?}", args.config);

    let config = config::load_config(&args.config)?;

    let ids = Arc::new(IdGenerator::new());
    let mut network = Network::new(
        args.mirrors,
        args.target_mirrors.unwrap_or(args.mirrors),
        args.links_per_mirror,
        &config,
        ids,
    );
    let strategy = config.topology.strategy();

    // initial build at sim time 0
    let links = strategy
        .init_network(&network, &config)
        .wrap_err("failed to build initial topology")?;
    network.add_links(links);
    info!(
        "initial topology: {} mirrors, {} links ({} targeted)",
        network.mirrors().len(),
        network.links().len(),
        strategy.num_target_links(&network)
    );

    let mut sim_time = 0;

    if args.add > 0 {
        sim_time += 1;
        strategy
            .handle_add_new_mirrors(&mut network, args.add, &config, sim_time)
            .wrap_err("failed to grow network")?;
    }

    if args.remove > 0 {
        sim_time += 1;
        strategy
            .handle_remove_mirrors(&mut network, args.remove, &config, sim_time)
            .wrap_err("failed to remove mirrors")?;
    }

    if args.restart {
        strategy
            .restart_network(&mut network, &config)
            .wrap_err("failed to restart network")?;
        info!("topology restarted");
    }

    info!(
        "final state: {} mirrors, {} links ({} active, {} targeted)",
        network.mirrors().len(),
        network.links().len(),
        network.num_active_links(),
        strategy.num_target_links(&network)
    );

    Ok(())
}
