//! Monte Carlo Tree Search (MCTS) for single-player puzzles.
//!
//! This crate provides a puzzle-agnostic UCT search that works with any
//! state implementing the `engine-core` Puzzle trait. It searches for a
//! short move sequence from a starting state to a solved state.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend from the root by UCT until a leaf
//! 2. **Expansion**: Add a child for every successor of the leaf that is
//!    not already on the root-to-leaf path
//! 3. **Simulation**: Random non-repeating playout from the leaf until the
//!    puzzle is solved (or no fresh move is left)
//! 4. **Backpropagation**: Score 1 if the playout's total turn count is no
//!    worse than the best known so far, else 0, and add it to every node
//!    from the leaf to the root
//!
//! # Usage
//!
//! ```rust
//! use games_hanoi::State;
//! use mcts::{MctsConfig, MctsSearch, UNSOLVED};
//!
//! let root = State::new(2).unwrap();
//! let mut search = MctsSearch::new(root, MctsConfig::default()).unwrap();
//!
//! let mut best = UNSOLVED;
//! for _ in 0..500 {
//!     best = search.run_iteration(best);
//! }
//!
//! assert_eq!(best, 3);
//! let path = search.extract_best_path();
//! println!("{} turns", path.turns);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_iterations`: Iterations performed by `run()` (default: 2000)
//! - `exploration`: UCT exploration constant (default: sqrt(2))
//! - `tie_break`: First-found or random choice among equal UCT scores
//! - `max_nodes`: Optional cap on the tree size
//! - `seed`: Seed of the ChaCha20 RNG

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, TieBreak};
pub use node::{MctsNode, NodeId};
pub use rollout::{random_playout, Playout};
pub use search::{
    run_mcts, MctsSearch, SearchError, SearchPath, SearchResult, SearchStats, UNSOLVED,
};
pub use tree::{MctsTree, TreeStats};
