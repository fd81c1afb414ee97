//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Nodes are only ever appended.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<P> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<P>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<P> MctsTree<P> {
    /// Create a new tree with the given root state.
    pub fn new(root_state: P, is_terminal: bool) -> Self {
        let root_node = MctsNode::new_root(root_state, is_terminal);
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<P> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<P> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<P>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<P>] {
        &self.nodes
    }

    /// Select the best child of a node by UCT, keeping the first of equal
    /// scores. Returns None for leaves.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_parent = (node.visit_count as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).uct_score(ln_parent, exploration);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Select the best child of a node by UCT, breaking ties uniformly at
    /// random. Returns None for leaves.
    pub fn select_child_random(
        &self,
        node_id: NodeId,
        exploration: f64,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        let ln_parent = (node.visit_count as f64).ln();

        let scores: Vec<f64> = node
            .children
            .iter()
            .map(|&id| self.get(id).uct_score(ln_parent, exploration))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let tied: Vec<NodeId> = node
            .children
            .iter()
            .zip(scores.iter())
            .filter(|(_, score)| **score == best)
            .map(|(&id, _)| id)
            .collect();

        match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            n => Some(tied[rng.gen_range(0..n)]),
        }
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, state: P, is_terminal: bool) -> NodeId {
        let child = MctsNode::new_child(parent_id, state, is_terminal);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Backpropagate an outcome from a node up to the root, inclusive.
    /// Every node on the way gains one visit and the same outcome.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.value_sum += outcome;
            current_id = node.parent;
        }
    }

    /// Node IDs from the root down to `node_id`, inclusive.
    pub fn path_from_root(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = node_id;
        while current.is_some() {
            path.push(current);
            current = self.get(current).parent;
        }
        path.reverse();
        path
    }

    /// Number of edges between the root and `node_id`.
    pub fn depth(&self, node_id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = self.get(node_id).parent;
        while current.is_some() {
            depth += 1;
            current = self.get(current).parent;
        }
        depth
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    // Iterative: tree depth is bounded only by the puzzle's state count.
    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in &self.get(id).children {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
