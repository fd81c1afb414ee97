//! Random playouts used to score a selected leaf.
//!
//! A playout walks random legal moves from a state until the puzzle is
//! solved, never revisiting a state that is already on the tree path or
//! earlier in the same playout. Running out of fresh moves ends the
//! playout as a dead end.

use std::collections::HashSet;

use engine_core::Puzzle;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::search::UNSOLVED;

/// Result of a single random playout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playout<P> {
    /// Reached a solved state. Holds the visited states after the start,
    /// so its length is the number of moves played.
    Solved(Vec<P>),

    /// Every successor of some state had already been seen.
    DeadEnd,
}

impl<P> Playout<P> {
    /// Moves played, or [`UNSOLVED`] for a dead end.
    pub fn turns(&self) -> u32 {
        match self {
            Playout::Solved(states) => states.len() as u32,
            Playout::DeadEnd => UNSOLVED,
        }
    }

    pub fn is_dead_end(&self) -> bool {
        matches!(self, Playout::DeadEnd)
    }
}

/// Play random non-repeating moves from `start` until solved.
///
/// `path` holds the states already on the tree path (root to `start`); none
/// of them may be revisited. Any error from the puzzle while drawing a move
/// ends the playout as a dead end.
pub fn random_playout<P: Puzzle>(start: &P, path: &[P], rng: &mut ChaCha20Rng) -> Playout<P> {
    if start.is_solved() {
        return Playout::Solved(Vec::new());
    }

    let mut seen: HashSet<P> = path.iter().cloned().collect();
    seen.insert(start.clone());

    let mut current = start.clone();
    let mut states = Vec::new();

    while !current.is_solved() {
        match current.random_successor_where(rng, |s| !seen.contains(s)) {
            Ok(next) => {
                seen.insert(next.clone());
                states.push(next.clone());
                current = next;
            }
            Err(err) => {
                trace!(moves = states.len(), error = %err, "Playout hit a dead end");
                return Playout::DeadEnd;
            }
        }
    }

    Playout::Solved(states)
}
