//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the checked-in defaults file is the single source of truth.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    solver: SolverDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    iterations: u32,
    rings: u32,
    exploration: f64,
    seed: u64,
    max_nodes: usize,
    random_tie_break: bool,
}

#[derive(Debug, Deserialize)]
struct SolverDefaults {
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn iterations() -> u32 {
    DEFAULTS.search.iterations
}
pub fn rings() -> u32 {
    DEFAULTS.search.rings
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn seed() -> u64 {
    DEFAULTS.search.seed
}
pub fn max_nodes() -> usize {
    DEFAULTS.search.max_nodes
}
pub fn random_tie_break() -> bool {
    DEFAULTS.search.random_tie_break
}

// Solver
pub fn log_interval() -> u32 {
    DEFAULTS.solver.log_interval
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
        assert_eq!(log_interval(), 500);
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(iterations(), 2000);
        assert_eq!(rings(), 3);
        assert!((exploration() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(seed(), 42);
        assert_eq!(max_nodes(), 0);
        assert!(!random_tie_break());
    }
}
