//! Tower of Hanoi puzzle implementation for the search engine
//!
//! This crate provides the three-peg disk stacking puzzle as an
//! `engine_core::Puzzle`, so it can be searched by the `mcts` crate.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Puzzle;
//! use games_hanoi::State;
//!
//! let state = State::new(3).expect("3 rings is a valid puzzle");
//! assert_eq!(state.successors().len(), 2);
//! assert!(!state.is_solved());
//! ```

use engine_core::{Puzzle, PuzzleError};
use std::fmt;

/// Number of pegs on the board
pub const PEGS: usize = 3;

/// Largest supported ring count (disks are stored as `u8`)
pub const MAX_RINGS: u32 = u8::MAX as u32;

/// Minimal number of moves needed to solve a puzzle with `rings` disks.
///
/// Saturates at `u64::MAX` for ring counts that do not fit.
pub fn optimal_turns(rings: u32) -> u64 {
    1u64.checked_shl(rings).map_or(u64::MAX, |v| v - 1)
}

/// A single move: take the top disk of peg `from` and put it on peg `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Find the legal move that turns `before` into `after`, if there is one.
    pub fn between(before: &State, after: &State) -> Option<Move> {
        before.legal_moves().into_iter().find(|mv| {
            let mut next = before.clone();
            next.apply_move(mv.from, mv.to);
            next == *after
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Puzzle state
///
/// Each peg holds its disks from bottom to top, so the last element of a
/// peg is its top disk. Disk sizes are `1..=rings` and strictly decrease
/// from bottom to top on every peg.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pegs: [Vec<u8>; PEGS],
    rings: u8,
}

impl State {
    /// Create the canonical starting state: every disk on peg 0.
    pub fn new(rings: u32) -> Result<Self, PuzzleError> {
        let rings = Self::check_ring_count(rings)?;
        Ok(Self {
            pegs: [(1..=rings).rev().collect(), Vec::new(), Vec::new()],
            rings,
        })
    }

    /// Create a state from explicit peg contents (bottom to top).
    ///
    /// The disks across all pegs must be exactly `1..=R` for some `R`, and
    /// each peg must be strictly decreasing from bottom to top.
    pub fn from_pegs(pegs: [Vec<u8>; PEGS]) -> Result<Self, PuzzleError> {
        let total: usize = pegs.iter().map(Vec::len).sum();
        let rings = Self::check_ring_count(total as u32)?;

        let mut seen = vec![false; rings as usize + 1];
        for (idx, peg) in pegs.iter().enumerate() {
            for &disk in peg {
                if disk == 0 || disk > rings {
                    return Err(PuzzleError::InvalidConfiguration(format!(
                        "disk {} on peg {} is outside 1..={}",
                        disk, idx, rings
                    )));
                }
                if std::mem::replace(&mut seen[disk as usize], true) {
                    return Err(PuzzleError::InvalidConfiguration(format!(
                        "disk {} appears more than once",
                        disk
                    )));
                }
            }
            if peg.windows(2).any(|w| w[0] <= w[1]) {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "peg {} has a larger disk on top of a smaller one: {:?}",
                    idx, peg
                )));
            }
        }

        Ok(Self { pegs, rings })
    }

    fn check_ring_count(rings: u32) -> Result<u8, PuzzleError> {
        if rings == 0 || rings > MAX_RINGS {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "ring count must be in 1..={}, got {}",
                MAX_RINGS, rings
            )));
        }
        Ok(rings as u8)
    }

    /// Number of disks in the puzzle
    pub fn rings(&self) -> u32 {
        self.rings as u32
    }

    /// Disks on a peg, bottom to top
    ///
    /// # Panics
    ///
    /// Panics if `idx >= PEGS`. Use [`State::top`] for a checked lookup.
    pub fn peg(&self, idx: usize) -> &[u8] {
        &self.pegs[idx]
    }

    /// Top disk of a peg (None if the peg is empty or out of range)
    pub fn top(&self, idx: usize) -> Option<u8> {
        self.pegs.get(idx).and_then(|peg| peg.last().copied())
    }

    /// All disks on the board, sorted ascending
    pub fn disks(&self) -> Vec<u8> {
        let mut disks: Vec<u8> = self.pegs.iter().flatten().copied().collect();
        disks.sort_unstable();
        disks
    }

    /// Check whether `from -> to` is a legal move
    pub fn is_legal(&self, from: usize, to: usize) -> bool {
        if from == to || to >= PEGS {
            return false;
        }
        match (self.top(from), self.top(to)) {
            (Some(_), None) => true,
            (Some(disk), Some(target)) => target > disk,
            (None, _) => false,
        }
    }

    /// Get legal moves, source peg ascending then destination peg ascending
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in 0..PEGS {
            if self.pegs[from].is_empty() {
                continue;
            }
            for to in 0..PEGS {
                if self.is_legal(from, to) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Move the top disk of `from` onto `to` in place.
    ///
    /// Illegal moves are silently ignored; random playouts rely on this and
    /// never validate their moves. Use [`State::try_move`] to get an error.
    pub fn apply_move(&mut self, from: usize, to: usize) {
        if !self.is_legal(from, to) {
            return;
        }
        if let Some(disk) = self.pegs[from].pop() {
            self.pegs[to].push(disk);
        }
    }

    /// Strict variant of [`State::apply_move`]
    pub fn try_move(&mut self, from: usize, to: usize) -> Result<(), PuzzleError> {
        if from >= PEGS || to >= PEGS {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "peg index out of range: {} -> {}",
                from, to
            )));
        }
        if from == to {
            return Err(PuzzleError::InvalidConfiguration(format!(
                "source and destination are both peg {}",
                from
            )));
        }
        let disk = self.top(from).ok_or_else(|| {
            PuzzleError::InvalidConfiguration(format!("cannot move from empty peg {}", from))
        })?;
        if let Some(target) = self.top(to) {
            if target < disk {
                return Err(PuzzleError::InvalidConfiguration(format!(
                    "cannot place disk {} on smaller disk {} (peg {} -> {})",
                    disk, target, from, to
                )));
            }
        }

        self.apply_move(from, to);
        Ok(())
    }

    /// Copy of this state with one move applied (silent on illegal moves)
    pub fn with_move(&self, mv: Move) -> State {
        let mut next = self.clone();
        next.apply_move(mv.from, mv.to);
        next
    }
}

impl Puzzle for State {
    fn successors(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .map(|mv| self.with_move(mv))
            .collect()
    }

    /// Solved once pegs 0 and 1 are both empty.
    fn is_solved(&self) -> bool {
        self.pegs[0].is_empty() && self.pegs[1].is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, peg) in self.pegs.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "[")?;
            for (i, disk) in peg.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", disk)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
