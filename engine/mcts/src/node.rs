//! MCTS tree node representation.
//!
//! Each node owns one puzzle state reached by a single move from its parent.
//! Nodes store the visit statistics used for UCT selection.

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<P> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Puzzle state at this node
    pub state: P,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of simulation outcomes (0 or 1 each) backpropagated through this node
    pub value_sum: f64,

    /// Whether the state is solved; terminal nodes are never expanded
    pub is_terminal: bool,

    /// Child node indices in expansion order.
    /// Empty until expanded, and forever for terminal or dead-end nodes.
    pub children: Vec<NodeId>,
}

impl<P> MctsNode<P> {
    /// Create a new root node.
    pub fn new_root(state: P, is_terminal: bool) -> Self {
        Self::new_child(NodeId::NONE, state, is_terminal)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, state: P, is_terminal: bool) -> Self {
        Self {
            parent,
            state,
            visit_count: 0,
            value_sum: 0.0,
            is_terminal,
            children: Vec::new(),
        }
    }

    /// Mean outcome `value_sum / visit_count`, 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f64
        }
    }

    /// UCT score for child selection.
    /// UCT = V/N + c * sqrt(ln(N_parent) / N)
    ///
    /// Unvisited nodes score `f64::INFINITY` so they are always tried first.
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant logs when
    /// comparing siblings.
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.value_sum / n + exploration * (ln_parent_visits.max(0.0) / n).sqrt()
    }

    /// Calculate UCT score (convenience method that computes ln internally).
    #[inline]
    pub fn uct_score_with_parent_visits(&self, parent_visits: u32, exploration: f64) -> f64 {
        self.uct_score((parent_visits as f64).ln(), exploration)
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// A leaf has no children: unexpanded, terminal or dead-ended.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
