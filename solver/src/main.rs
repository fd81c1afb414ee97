//! Solver - runs Monte Carlo Tree Search on the Tower of Hanoi
//!
//! 1. Builds the starting position (all rings on peg 0)
//! 2. Runs the configured number of MCTS iterations, tracking the best
//!    turn count found by any playout
//! 3. Prints the path the finished tree prefers by UCT, and the shortest
//!    concrete solution seen along the way

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod config;
mod solver;

use crate::config::Config;
use crate::solver::Solver;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");
    info!(
        rings = config.rings,
        iterations = config.iterations,
        exploration = config.exploration,
        seed = config.seed,
        "Starting solver"
    );

    let mut solver = Solver::new(config)?;
    let report = solver.run();

    print!("{}", report);
    Ok(())
}
