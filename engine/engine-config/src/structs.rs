//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_rings() -> u32 {
    defaults::rings()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_max_nodes() -> usize {
    defaults::max_nodes()
}
fn d_random_tie_break() -> bool {
    defaults::random_tie_break()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search configuration: puzzle size and MCTS parameters
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_rings")]
    pub rings: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Node cap for the search tree (0 = unlimited)
    #[serde(default = "d_max_nodes")]
    pub max_nodes: usize,
    #[serde(default = "d_random_tie_break")]
    pub random_tie_break: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            rings: defaults::rings(),
            exploration: defaults::exploration(),
            seed: defaults::seed(),
            max_nodes: defaults::max_nodes(),
            random_tie_break: defaults::random_tie_break(),
        }
    }
}

/// Solver (driver) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SolverConfig {
    /// Log progress every N iterations (0 to disable)
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            log_interval: defaults::log_interval(),
        }
    }
}
