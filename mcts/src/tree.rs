//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by `NodeId`
//! indices: parents exclusively own their children through the arena, and
//! parent back-references are plain indices that never extend a lifetime.
//! Ids are handed out monotonically, so the root is always id 0 and a
//! node's id records its creation order.

use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::node::{Node, NodeId};
use crate::strategy::{Backpropagation, ExpansionStrategy};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S, A, E> {
    /// Arena storing all nodes
    nodes: Vec<Node<S, A, E>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S, A, E> SearchTree<S, A, E>
where
    E: ExpansionStrategy<S, A>,
{
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: S) -> Self
    where
        A: Default,
    {
        let root = Node::new_root(root_state);
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Add a child under `parent` for the state reached via `action`.
    /// Returns the new child's NodeId.
    ///
    /// The action must have come from the parent's own expansion cursor so
    /// that the children stay a prefix of the cursor's enumeration order.
    pub fn add_child(&mut self, parent: NodeId, state: S, action: A) -> NodeId {
        let child = Node::new(parent, state, action);
        let child_id = self.allocate(child);

        self.get_mut(parent).children.push(child_id);

        child_id
    }
}

impl<S, A, E> SearchTree<S, A, E> {
    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S, A, E> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, A, E> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: Node<S, A, E>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[Node<S, A, E>] {
        &self.nodes
    }

    /// Select a child of `parent` for descent.
    ///
    /// While the parent has fewer than `min_visits_for_uct` visits the
    /// child is drawn uniformly at random; with so few samples the UCT
    /// exploration term carries no signal. Past the gate the child with the
    /// maximum UCT score wins, first one in insertion order on ties. A
    /// child that has never been visited is taken outright, keeping the
    /// visit-count division well-defined.
    ///
    /// `parent` must have at least one child.
    pub fn select_child(
        &self,
        parent: NodeId,
        c: f32,
        min_visits_for_uct: u32,
        rng: &mut ChaCha20Rng,
    ) -> NodeId {
        let node = self.get(parent);
        debug_assert!(!node.children.is_empty());

        if node.visits < min_visits_for_uct {
            return node.children[rng.gen_range(0..node.children.len())];
        }

        let parent_visits_ln = (node.visits as f32).ln();
        let mut best = NodeId::NONE;
        let mut best_score = f32::NEG_INFINITY;

        for &child_id in &node.children {
            let child = self.get(child_id);
            if child.visits == 0 {
                return child_id;
            }

            let score = child.uct_score(parent_visits_ln, c);
            if score > best_score {
                best_score = score;
                best = child_id;
            }
        }

        best
    }

    /// Backpropagate a terminal score from `from` up to and including the
    /// root.
    ///
    /// At every node on the path, the root included, the score is first
    /// passed through the adjustment hook for that node's state, and the
    /// adjusted value is what the node accumulates.
    pub fn backpropagate<B>(&mut self, from: NodeId, score: f32, backprop: &B)
    where
        B: Backpropagation<S>,
    {
        let mut current = from;
        while current.is_some() {
            let node = self.get_mut(current);
            let adjusted = backprop.adjust_score(&node.state, score);
            node.update(adjusted);
            current = node.parent;
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_mean: root.mean_score(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        node.children
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_mean: f32,
    pub max_depth: u32,
}
