//! MCTS configuration parameters.

/// How to choose among children that share the best UCT score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep the first best child in expansion order.
    #[default]
    FirstFound,
    /// Pick uniformly at random among the best children.
    Random,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of iterations `run()` performs.
    pub num_iterations: u32,

    /// Exploration constant `c` in `V/N + c * sqrt(ln(N_parent) / N)`.
    /// The classic UCT value is sqrt(2).
    pub exploration: f64,

    /// Tie-break policy for selection. Path extraction always uses
    /// `FirstFound` so that it stays a read-only query.
    pub tie_break: TieBreak,

    /// Upper bound on the number of nodes in the tree.
    /// Once an expansion would exceed it the leaf is simulated unexpanded.
    /// `None` lets the tree grow without limit.
    pub max_nodes: Option<usize>,

    /// Seed for the ChaCha20 generator driving playouts and tie-breaks.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_iterations: 2000,
            exploration: std::f64::consts::SQRT_2,
            tie_break: TieBreak::FirstFound,
            max_nodes: None,
            seed: 42,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_iterations: 500,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.num_iterations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Builder pattern: cap the tree size.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Builder pattern: remove the tree size cap.
    pub fn without_node_cap(mut self) -> Self {
        self.max_nodes = None;
        self
    }

    /// Builder pattern: set RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
