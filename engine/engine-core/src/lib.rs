//! Core traits and types for the puzzle search engine
//!
//! This crate provides the narrow contract the search engine relies on:
//! - `Puzzle`: Typed trait describing a single-player, discrete-move puzzle
//! - `PuzzleError`: Failure kinds shared by puzzle implementations
//!
//! The search engine never looks inside a puzzle state. It only needs to
//! enumerate successors, compare states for equality and ask whether a
//! state is solved.

pub mod typed;

// Re-export main types for convenience
pub use typed::{Puzzle, PuzzleError};
