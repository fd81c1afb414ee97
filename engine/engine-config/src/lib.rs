//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across all Rust components (the solver binary, benchmarks).
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`HANOI_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! HANOI_<SECTION>_<KEY>=value
//!
//! Examples:
//!     HANOI_COMMON_LOG_LEVEL=debug
//!     HANOI_SEARCH_ITERATIONS=5000
//!     HANOI_SEARCH_RINGS=4
//!     HANOI_SOLVER_LOG_INTERVAL=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
