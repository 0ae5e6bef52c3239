//! Search tree node representation.
//!
//! Each node represents a game state reached by applying an action to the
//! parent's state. Nodes store the visit/score aggregates used for UCT
//! selection and own the expansion cursor that lazily produces their
//! untried actions.

use crate::strategy::ExpansionStrategy;

/// Index into the node arena. Using a newtype for type safety.
///
/// The arena assigns ids monotonically, so the id doubles as a creation
/// ordinal; the root is always `NodeId(0)`.
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

/// A node in the search tree.
#[derive(Debug)]
pub struct Node<S, A, E> {
    /// Parent node index (NONE for the root)
    pub parent: NodeId,

    /// Action applied to the parent's state to produce this node's state.
    /// The root carries an unused default action.
    pub action: A,

    /// Game state at this node
    pub state: S,

    /// Enumerator over the actions not yet turned into children
    pub expansion: E,

    /// Number of times this node has been updated
    pub visits: u32,

    /// Sum of adjusted scores applied to this node
    pub score_sum: f32,

    /// Children in insertion order, which is also expansion order
    pub children: Vec<NodeId>,
}

impl<S, A, E> Node<S, A, E>
where
    E: ExpansionStrategy<S, A>,
{
    /// Create a node for `state`, constructing its expansion cursor.
    pub fn new(parent: NodeId, state: S, action: A) -> Self {
        let expansion = E::from_state(&state);
        Self {
            parent,
            action,
            state,
            expansion,
            visits: 0,
            score_sum: 0.0,
            children: Vec::new(),
        }
    }

    /// Create a root node with a default incoming action.
    pub fn new_root(state: S) -> Self
    where
        A: Default,
    {
        Self::new(NodeId::NONE, state, A::default())
    }

    /// Draw the next untried action from the expansion cursor.
    ///
    /// Only valid while [`should_expand`](Node::should_expand) is true and
    /// the cursor has not run dry.
    pub fn next_action(&mut self) -> A {
        self.expansion.next_action()
    }

    /// Whether this node still has untried actions, i.e. selection should
    /// stop here rather than descend further.
    #[inline]
    pub fn should_expand(&self) -> bool {
        self.children.is_empty() || self.expansion.has_next()
    }

    /// Whether every legal action has been turned into a child.
    #[inline]
    pub fn fully_expanded(&self) -> bool {
        !self.should_expand()
    }
}

impl<S, A, E> Node<S, A, E> {
    /// Accumulate an adjusted score and count the visit.
    #[inline]
    pub fn update(&mut self, score: f32) {
        self.score_sum += score;
        self.visits += 1;
    }

    /// Mean score over all visits.
    ///
    /// NaN for a node that has never been visited; callers on the
    /// selection and result paths only see visited nodes.
    #[inline]
    pub fn mean_score(&self) -> f32 {
        self.score_sum / self.visits as f32
    }

    /// UCT score of this node as a child of a parent with
    /// `ln(parent.visits) == parent_visits_ln`.
    ///
    /// `uct = mean + c * sqrt(ln(N_parent) / N_child)`. Higher is more
    /// promising. The log is taken once per parent, not per child.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f32, c: f32) -> f32 {
        self.mean_score() + c * (parent_visits_ln / self.visits as f32).sqrt()
    }
}
