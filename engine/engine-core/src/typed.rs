//! Typed Puzzle trait used by the search engine
//!
//! Implementations work with their own strongly-typed state. The engine
//! only relies on value equality, hashing and successor enumeration.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::fmt::Debug;
use std::hash::Hash;

/// Error type for puzzle operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// A successor was required but none passed the filter.
    #[error("No legal non-repeating moves available")]
    ExhaustedMoves,

    /// The state or move is not valid for this puzzle.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Main trait for puzzle states
///
/// A value of the implementing type is one complete configuration of the
/// puzzle. Successors are independent copies; states are never mutated
/// through the trait.
///
/// # Example
///
/// ```rust
/// use engine_core::Puzzle;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Counter(u8);
///
/// impl Puzzle for Counter {
///     fn successors(&self) -> Vec<Self> {
///         if self.0 < 3 { vec![Counter(self.0 + 1)] } else { Vec::new() }
///     }
///
///     fn is_solved(&self) -> bool {
///         self.0 == 3
///     }
/// }
///
/// assert_eq!(Counter(0).successors(), vec![Counter(1)]);
/// assert!(Counter(3).is_solved());
/// ```
pub trait Puzzle: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Enumerate every state reachable by exactly one legal move.
    ///
    /// The order must be deterministic for a given state.
    fn successors(&self) -> Vec<Self>;

    /// Whether this state is the goal (terminal) configuration.
    fn is_solved(&self) -> bool;

    /// Pick a successor uniformly at random among those accepted by `keep`.
    ///
    /// Returns [`PuzzleError::ExhaustedMoves`] when no successor is accepted.
    fn random_successor_where<F>(
        &self,
        rng: &mut ChaCha20Rng,
        mut keep: F,
    ) -> Result<Self, PuzzleError>
    where
        F: FnMut(&Self) -> bool,
    {
        let mut candidates: Vec<Self> = self.successors();
        candidates.retain(|s| keep(s));

        if candidates.is_empty() {
            return Err(PuzzleError::ExhaustedMoves);
        }

        let idx = rng.gen_range(0..candidates.len());
        Ok(candidates.swap_remove(idx))
    }

    /// Pick any successor uniformly at random.
    fn random_successor(&self, rng: &mut ChaCha20Rng) -> Result<Self, PuzzleError> {
        self.random_successor_where(rng, |_| true)
    }
}
