//! Configuration for the solver
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_hanoi::MAX_RINGS;
use mcts::{MctsConfig, TieBreak};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn default_iterations() -> u32 {
    env_or("SOLVER_ITERATIONS", CENTRAL_CONFIG.search.iterations)
}

fn default_rings() -> u32 {
    env_or("SOLVER_RINGS", CENTRAL_CONFIG.search.rings)
}

fn default_exploration() -> f64 {
    env_or("SOLVER_EXPLORATION", CENTRAL_CONFIG.search.exploration)
}

fn default_seed() -> u64 {
    env_or("SOLVER_SEED", CENTRAL_CONFIG.search.seed)
}

fn default_max_nodes() -> usize {
    env_or("SOLVER_MAX_NODES", CENTRAL_CONFIG.search.max_nodes)
}

fn default_random_tie_break() -> bool {
    env_or(
        "SOLVER_RANDOM_TIE_BREAK",
        CENTRAL_CONFIG.search.random_tie_break,
    )
}

fn default_log_level() -> String {
    std::env::var("SOLVER_LOG_LEVEL").unwrap_or_else(|_| CENTRAL_CONFIG.common.log_level.clone())
}

fn default_log_interval() -> u32 {
    env_or("SOLVER_LOG_INTERVAL", CENTRAL_CONFIG.solver.log_interval)
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "solver")]
#[command(about = "Tower of Hanoi solver using Monte Carlo Tree Search")]
#[command(
    long_about = "Runs UCT Monte Carlo Tree Search on the three-peg Tower of Hanoi and
reports the best path found.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of MCTS iterations to run
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Number of rings on the starting peg
    #[arg(long, default_value_t = default_rings())]
    pub rings: u32,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Seed for the random number generator
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Maximum nodes in the search tree (0 for unlimited)
    #[arg(long, default_value_t = default_max_nodes())]
    pub max_nodes: usize,

    /// Break UCT ties uniformly at random instead of taking the first child
    #[arg(long, default_value_t = default_random_tie_break())]
    pub random_tie_break: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log progress every N iterations (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.rings == 0 || self.rings > MAX_RINGS {
            return Err(anyhow!(
                "rings must be between 1 and {}, got {}",
                MAX_RINGS,
                self.rings
            ));
        }

        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search parameters for the MCTS engine.
    pub fn mcts_config(&self) -> MctsConfig {
        let tie_break = if self.random_tie_break {
            TieBreak::Random
        } else {
            TieBreak::FirstFound
        };

        let config = MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration(self.exploration)
            .with_tie_break(tie_break)
            .with_seed(self.seed);

        match self.max_nodes {
            0 => config.without_node_cap(),
            cap => config.with_max_nodes(cap),
        }
    }
}
