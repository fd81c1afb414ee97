//! MCTS search implementation.
//!
//! Implements the core MCTS iteration:
//! 1. Selection: Traverse tree using UCT to find a leaf
//! 2. Expansion: Add every non-repeating successor of the leaf
//! 3. Simulation: Random playout from the leaf to a solved state
//! 4. Backpropagation: Score the playout against the best turn count so far
//!    and update statistics along the path to the root

use engine_core::Puzzle;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, TieBreak};
use crate::node::NodeId;
use crate::rollout::{random_playout, Playout};
use crate::tree::MctsTree;

/// Turn count meaning "no solution found". Dead-end playouts score as this.
pub const UNSOLVED: u32 = u32::MAX;

/// Errors that can occur when setting up an MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// A sequence of states starting at the root, one move apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath<P> {
    /// States from the root, inclusive
    pub states: Vec<P>,

    /// Number of moves (`states.len() - 1`)
    pub turns: u32,
}

impl<P: Puzzle> SearchPath<P> {
    fn from_states(states: Vec<P>) -> Self {
        let turns = states.len().saturating_sub(1) as u32;
        Self { states, turns }
    }

    /// Whether the path ends in a solved state.
    pub fn is_solved(&self) -> bool {
        self.states.last().map_or(false, |s| s.is_solved())
    }
}

/// Result of a full MCTS run.
#[derive(Debug, Clone)]
pub struct SearchResult<P> {
    /// Best turn count found, None if no playout ever solved the puzzle
    pub best_turns: Option<u32>,

    /// Path extracted from the final tree by UCT
    pub path: SearchPath<P>,

    /// Number of iterations performed
    pub iterations: u32,

    /// Nodes in the tree at the end of the run
    pub tree_size: usize,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub iterations: u32,
    pub dead_end_playouts: u32,
    pub improvements: u32,
    pub skipped_expansions: u32,
}

/// MCTS search state.
pub struct MctsSearch<P: Puzzle> {
    tree: MctsTree<P>,
    config: MctsConfig,
    rng: ChaCha20Rng,
    best_solution: Option<SearchPath<P>>,
    stats: SearchStats,
}

impl<P: Puzzle> MctsSearch<P> {
    /// Create a new MCTS search rooted at `root`, seeding the RNG from the config.
    pub fn new(root: P, config: MctsConfig) -> Result<Self, SearchError> {
        let rng = ChaCha20Rng::seed_from_u64(config.seed);
        Self::with_rng(root, config, rng)
    }

    /// Create a new MCTS search with an explicit RNG.
    pub fn with_rng(root: P, config: MctsConfig, rng: ChaCha20Rng) -> Result<Self, SearchError> {
        if !config.exploration.is_finite() || config.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be finite and non-negative, got {}",
                config.exploration
            )));
        }
        if config.max_nodes == Some(0) {
            return Err(SearchError::InvalidConfig(
                "max_nodes must leave room for the root".to_string(),
            ));
        }

        let is_terminal = root.is_solved();
        Ok(Self {
            tree: MctsTree::new(root, is_terminal),
            config,
            rng,
            best_solution: None,
            stats: SearchStats::default(),
        })
    }

    /// Run the search for the configured number of iterations.
    pub fn run(&mut self) -> SearchResult<P> {
        let mut best = UNSOLVED;
        for _ in 0..self.config.num_iterations {
            best = self.run_iteration(best);
        }

        SearchResult {
            best_turns: (best != UNSOLVED).then_some(best),
            path: self.extract_best_path(),
            iterations: self.config.num_iterations,
            tree_size: self.tree.len(),
        }
    }

    /// Run one iteration (select -> expand -> simulate -> backpropagate).
    ///
    /// `best_turns` is the best total turn count known before this iteration
    /// ([`UNSOLVED`] at the start). The playout scores 1 if its total is no
    /// worse than that, 0 otherwise. Returns the updated best.
    pub fn run_iteration(&mut self, best_turns: u32) -> u32 {
        // Selection: traverse to a leaf
        let path = self.select();
        let leaf_id = path[path.len() - 1];
        let depth = (path.len() - 1) as u32;

        let path_states: Vec<P> = path
            .iter()
            .map(|&id| self.tree.get(id).state.clone())
            .collect();

        // Expansion
        self.expand(leaf_id, &path_states);

        // Simulation from the selected leaf itself
        let playout = random_playout(&self.tree.get(leaf_id).state, &path_states, &mut self.rng);
        let total = playout.turns().saturating_add(depth);

        // Backpropagation
        let outcome = if total <= best_turns { 1.0 } else { 0.0 };
        self.tree.backpropagate(leaf_id, outcome);

        self.stats.iterations += 1;
        match playout {
            Playout::DeadEnd => self.stats.dead_end_playouts += 1,
            Playout::Solved(states) => self.record_solution(path_states, states, total),
        }

        trace!(
            leaf = leaf_id.0,
            depth,
            total,
            outcome,
            "MCTS iteration complete"
        );

        best_turns.min(total)
    }

    /// Walk from the root to a leaf by repeatedly taking the best UCT child.
    /// Returns the node IDs on the way, root first.
    fn select(&mut self) -> Vec<NodeId> {
        let mut path = vec![self.tree.root()];
        let mut current = self.tree.root();

        loop {
            let next = match self.config.tie_break {
                TieBreak::FirstFound => self.tree.select_child(current, self.config.exploration),
                TieBreak::Random => {
                    self.tree
                        .select_child_random(current, self.config.exploration, &mut self.rng)
                }
            };

            match next {
                Some(child_id) => {
                    path.push(child_id);
                    current = child_id;
                }
                None => break, // Leaf
            }
        }

        path
    }

    /// Expand a leaf with every successor not already on its root path.
    /// Terminal and dead-end leaves stay childless.
    fn expand(&mut self, node_id: NodeId, path_states: &[P]) {
        let node = self.tree.get(node_id);

        // Don't expand terminal nodes
        if node.is_terminal || node.is_expanded() {
            return;
        }

        let successors: Vec<P> = node
            .state
            .successors()
            .into_iter()
            .filter(|s| !path_states.contains(s))
            .collect();

        if successors.is_empty() {
            trace!(node = node_id.0, "Leaf has no non-repeating moves");
            return;
        }

        if let Some(cap) = self.config.max_nodes {
            if self.tree.len() + successors.len() > cap {
                self.stats.skipped_expansions += 1;
                debug!(
                    node = node_id.0,
                    tree_size = self.tree.len(),
                    cap,
                    "Node cap reached, simulating leaf unexpanded"
                );
                return;
            }
        }

        for state in successors {
            let is_terminal = state.is_solved();
            self.tree.add_child(node_id, state, is_terminal);
        }
    }

    fn record_solution(&mut self, mut path_states: Vec<P>, playout: Vec<P>, total: u32) {
        let improved = self
            .best_solution
            .as_ref()
            .map_or(true, |best| total < best.turns);
        if !improved {
            return;
        }

        path_states.extend(playout);
        let solution = SearchPath::from_states(path_states);
        debug!(
            turns = solution.turns,
            iteration = self.stats.iterations,
            "Found shorter solution"
        );
        self.stats.improvements += 1;
        self.best_solution = Some(solution);
    }

    /// Descend from the root by UCT (first of equal scores) until a childless
    /// node, without changing the tree.
    pub fn extract_best_path(&self) -> SearchPath<P> {
        let mut current = self.tree.root();
        let mut states = vec![self.tree.get(current).state.clone()];

        while let Some(child_id) = self.tree.select_child(current, self.config.exploration) {
            current = child_id;
            states.push(self.tree.get(current).state.clone());
        }

        SearchPath::from_states(states)
    }

    /// The shortest root-to-solved sequence any playout has produced so far.
    pub fn best_solution(&self) -> Option<&SearchPath<P>> {
        self.best_solution.as_ref()
    }

    /// Counters for the iterations run so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The search configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<P> {
        &self.tree
    }
}

/// Convenience function to run a complete MCTS search from `root`.
pub fn run_mcts<P: Puzzle>(root: P, config: MctsConfig) -> Result<SearchResult<P>, SearchError> {
    let mut search = MctsSearch::new(root, config)?;
    Ok(search.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_hanoi::{optimal_turns, Move, State};
    use std::collections::HashSet;

    fn search(rings: u32, config: MctsConfig) -> MctsSearch<State> {
        MctsSearch::new(State::new(rings).unwrap(), config).unwrap()
    }

    fn run_iterations(search: &mut MctsSearch<State>, n: u32) -> u32 {
        let mut best = UNSOLVED;
        for _ in 0..n {
            best = search.run_iteration(best);
        }
        best
    }

    fn assert_legal_sequence(states: &[State]) {
        for pair in states.windows(2) {
            assert!(
                Move::between(&pair[0], &pair[1]).is_some(),
                "{} -> {} is not a single legal move",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_single_ring_solved_in_one_turn() {
        let mut search = search(1, MctsConfig::for_testing());

        let best = run_iterations(&mut search, 3);
        assert_eq!(best, 1);

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.children.len(), 2);

        // Only the move onto peg 2 solves the puzzle
        let terminal: Vec<bool> = root
            .children
            .iter()
            .map(|&id| tree.get(id).is_terminal)
            .collect();
        assert_eq!(terminal, vec![false, true]);
    }

    fn first_iteration(seed: u64) -> MctsSearch<State> {
        let mut search = search(1, MctsConfig::default().with_seed(seed));
        let best = search.run_iteration(UNSOLVED);
        assert_eq!(search.stats().iterations, 1);
        assert_eq!(search.best_solution().map(|s| s.turns), Some(best));
        search
    }

    #[test]
    fn test_first_iteration_direct_playout() {
        // The playout from the root moves straight onto peg 2
        let search = first_iteration(1);
        let solution = search.best_solution().unwrap();
        assert_eq!(solution.turns, 1);
        assert_eq!(solution.states[1].peg(2), &[1]);

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visit_count, 1);
        assert!((root.value_sum - 1.0).abs() < 1e-12);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_first_iteration_detour_through_peg_one() {
        // The playout goes 0 -> 1 then 1 -> 2, since returning to the root is excluded
        let search = first_iteration(2);
        let solution = search.best_solution().unwrap();
        assert_eq!(solution.turns, 2);
        assert_eq!(solution.states[1].peg(1), &[1]);
        assert_eq!(solution.states[2].peg(2), &[1]);

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visit_count, 1);
        assert!((root.value_sum - 1.0).abs() < 1e-12);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_outcome_scored_against_best_so_far() {
        let mut search = search(2, MctsConfig::for_testing());

        // Nothing beats zero turns, so every playout scores 0
        for _ in 0..20 {
            assert_eq!(search.run_iteration(0), 0);
        }

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visit_count, 20);
        assert!(root.value_sum.abs() < 1e-12);
    }

    #[test]
    fn test_three_rings_solution_is_full_transfer() {
        let mut search = search(3, MctsConfig::default().with_iterations(5000));
        let result = search.run();

        // Seed 42 converges on the optimum
        assert_eq!(result.best_turns, Some(7));
        assert_eq!(result.iterations, 5000);
        assert_eq!(search.stats().iterations, 5000);

        let solution = search.best_solution().expect("a solution should be recorded");
        assert_eq!(solution.turns, 7);
        assert_eq!(solution.states.len(), 8);
        assert_eq!(solution.states[0], State::new(3).unwrap());
        assert!(solution.is_solved());
        assert_eq!(solution.states[7].peg(2), &[3, 2, 1]);
        assert_legal_sequence(&solution.states);
    }

    /// Best turn counts for seeds `0..100` on three rings after 5000 iterations.
    fn three_ring_sweep(tie_break: TieBreak) -> Vec<(u64, u32)> {
        (0..100)
            .map(|seed| {
                let config = MctsConfig::default()
                    .with_iterations(5000)
                    .with_tie_break(tie_break)
                    .with_seed(seed);
                let result = run_mcts(State::new(3).unwrap(), config).unwrap();
                (seed, result.best_turns.unwrap_or(UNSOLVED))
            })
            .collect()
    }

    fn assert_sweep(tie_break: TieBreak, min_optimal: usize) {
        let sweep = three_ring_sweep(tie_break);

        // Some seeds settle one move above the optimum and stay there
        for &(seed, best) in &sweep {
            assert!(
                best == 7 || best == 8,
                "seed {} ended at {} turns",
                seed,
                best
            );
        }

        let optimal = sweep.iter().filter(|&&(_, best)| best == 7).count();
        assert!(
            optimal >= min_optimal,
            "only {} of {} seeds reached 7 turns",
            optimal,
            sweep.len()
        );
    }

    #[test]
    fn test_three_rings_seed_sweep_first_found() {
        assert_sweep(TieBreak::FirstFound, 80);
    }

    #[test]
    fn test_three_rings_seed_sweep_random_tie_break() {
        assert_sweep(TieBreak::Random, 75);
    }

    #[test]
    fn test_three_rings_stall_above_optimum() {
        let config = MctsConfig::default().with_iterations(5000).with_seed(1);
        let mut search = search(3, config);
        let result = search.run();

        assert_eq!(result.best_turns, Some(8));
        assert_eq!(search.best_solution().map(|s| s.turns), Some(8));
    }

    #[test]
    fn test_best_turns_never_below_optimal() {
        for rings in 1..=4 {
            let mut search = search(rings, MctsConfig::default().with_seed(rings as u64));
            let mut best = UNSOLVED;
            for _ in 0..1000 {
                best = search.run_iteration(best);
                assert!(best as u64 >= optimal_turns(rings));
            }
            if let Some(solution) = search.best_solution() {
                assert_eq!(solution.turns, best);
            }
        }
    }

    #[test]
    fn test_extract_best_path_is_consistent() {
        let mut search = search(3, MctsConfig::for_testing().with_iterations(2000));
        search.run();

        let path = search.extract_best_path();
        assert_eq!(path.states[0], State::new(3).unwrap());
        assert_eq!(path.turns as usize, path.states.len() - 1);
        assert!(path.turns >= 1);
        assert_legal_sequence(&path.states);

        let unique: HashSet<&State> = path.states.iter().collect();
        assert_eq!(unique.len(), path.states.len());

        if path.is_solved() {
            assert!(path.turns as u64 >= optimal_turns(3));
        }

        // Read-only: asking twice gives the same answer
        assert_eq!(search.extract_best_path(), path);
    }

    #[test]
    fn test_extract_best_path_on_fresh_tree() {
        let search = search(3, MctsConfig::for_testing());
        let path = search.extract_best_path();
        assert_eq!(path.states, vec![State::new(3).unwrap()]);
        assert_eq!(path.turns, 0);
        assert!(!path.is_solved());
    }

    #[test]
    fn test_tree_paths_never_repeat_states() {
        let mut search = search(3, MctsConfig::for_testing().with_iterations(1500));
        search.run();

        let tree = search.tree();
        for idx in 0..tree.len() {
            let path = tree.path_from_root(NodeId(idx as u32));
            let states: HashSet<&State> = path.iter().map(|&id| &tree.get(id).state).collect();
            assert_eq!(states.len(), path.len());
        }
    }

    #[test]
    fn test_visit_counts_and_terminal_leaves() {
        let mut search = search(3, MctsConfig::for_testing());
        search.run();

        let tree = search.tree();
        assert_eq!(tree.get(tree.root()).visit_count, 500);

        for node in tree.arena() {
            if node.is_terminal {
                assert!(node.children.is_empty());
            }
            for &child in &node.children {
                let child = tree.get(child);
                assert!(child.visit_count <= node.visit_count);
                assert!(child.value_sum <= child.visit_count as f64);
            }
            let child_visits: u32 = node.children.iter().map(|&c| tree.get(c).visit_count).sum();
            assert!(child_visits <= node.visit_count);
        }
    }

    #[test]
    fn test_node_cap_is_respected() {
        let config = MctsConfig::for_testing().with_max_nodes(12);
        let mut search = search(3, config);
        search.run();

        assert!(search.tree().len() <= 12);
        assert!(search.stats().skipped_expansions > 0);
        assert_eq!(search.tree().get(search.tree().root()).visit_count, 500);
    }

    #[test]
    fn test_same_seed_same_search() {
        let config = MctsConfig::for_testing().with_seed(99);
        let mut a = search(3, config.clone());
        let mut b = search(3, config);

        let result_a = a.run();
        let result_b = b.run();

        assert_eq!(result_a.best_turns, result_b.best_turns);
        assert_eq!(result_a.tree_size, result_b.tree_size);
        assert_eq!(result_a.path, result_b.path);
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_random_tie_break_finds_optimal() {
        let config = MctsConfig::default()
            .with_iterations(1000)
            .with_tie_break(TieBreak::Random);
        let result = run_mcts(State::new(2).unwrap(), config).unwrap();
        assert_eq!(result.best_turns, Some(3));
    }

    #[test]
    fn test_solved_root_is_never_expanded() {
        let solved = State::from_pegs([vec![], vec![], vec![2, 1]]).unwrap();
        let mut search = MctsSearch::new(solved.clone(), MctsConfig::for_testing()).unwrap();

        assert_eq!(search.run_iteration(UNSOLVED), 0);
        assert_eq!(search.tree().len(), 1);

        let solution = search.best_solution().unwrap();
        assert_eq!(solution.states, vec![solved]);
        assert_eq!(solution.turns, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let root = State::new(3).unwrap();

        let nan = MctsConfig::default().with_exploration(f64::NAN);
        assert!(matches!(
            MctsSearch::new(root.clone(), nan),
            Err(SearchError::InvalidConfig(_))
        ));

        let negative = MctsConfig::default().with_exploration(-1.0);
        assert!(MctsSearch::new(root.clone(), negative).is_err());

        let no_room = MctsConfig::default().with_max_nodes(0);
        let err = MctsSearch::new(root, no_room).err().unwrap();
        assert!(err.to_string().contains("max_nodes"));
    }
}
