//! The budgeted search driver.
//!
//! Implements the four-phase loop: descend through fully-expanded nodes by
//! UCT, expand one child once a leaf has proven itself, play the position
//! out to a terminal state, and backpropagate the adjusted score along the
//! path back to the root.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::strategy::{
    Action, Backpropagation, ExpansionStrategy, PlayoutStrategy, Scoring, TerminationCheck,
};
use crate::tree::SearchTree;

/// Monte Carlo Tree Search engine for one root position.
///
/// Type parameters:
///
/// - `S`: game state, `A`: action (see [`Action`])
/// - `E`: per-node enumerator of untried actions ([`ExpansionStrategy`])
/// - `P`: random move generator for playouts ([`PlayoutStrategy`])
/// - `B`: per-node score adjustment ([`Backpropagation`])
/// - `T`: end-of-game test ([`TerminationCheck`])
/// - `V`: terminal state valuation ([`Scoring`])
///
/// Embedders typically fix all seven parameters in a type alias per game.
/// Every call to [`find_best_action`](Mcts::find_best_action) builds a
/// fresh tree from the root state and a fresh RNG from the configured
/// seed, so repeated calls on an unchanged engine give identical results.
pub struct Mcts<S, A, E, P, B, T, V> {
    root_state: S,
    backprop: B,
    termination: T,
    scoring: V,
    config: MctsConfig,
    tree: Option<SearchTree<S, A, E>>,
    playout: PhantomData<P>,
}

impl<S, A, E, P, B, T, V> Mcts<S, A, E, P, B, T, V>
where
    S: Clone,
    A: Action<S>,
    E: ExpansionStrategy<S, A>,
    P: PlayoutStrategy<S, A>,
    B: Backpropagation<S>,
    T: TerminationCheck<S>,
    V: Scoring<S>,
{
    /// Create an engine for `root_state` with the default configuration.
    pub fn new(root_state: S, backprop: B, termination: T, scoring: V) -> Self {
        Self {
            root_state,
            backprop,
            termination,
            scoring,
            config: MctsConfig::default(),
            tree: None,
            playout: PhantomData,
        }
    }

    /// Builder pattern: replace the configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Mutable access to the configuration; effective for the next search.
    pub fn config_mut(&mut self) -> &mut MctsConfig {
        &mut self.config
    }

    /// Replace the configuration; effective for the next search.
    pub fn set_config(&mut self, config: MctsConfig) {
        self.config = config;
    }

    /// Run the search and return the recommended action.
    ///
    /// The returned action is the incoming action of the root child with
    /// the highest mean score, first in insertion order on ties. If the
    /// budget expired before any child was created (or the root is already
    /// terminal), a single random playout action over the root state is
    /// returned instead.
    pub fn find_best_action(&mut self) -> A {
        let tree = self.search();

        let root = tree.get(tree.root());
        let mut best = NodeId::NONE;
        let mut best_score = f32::NEG_INFINITY;

        for &child_id in &root.children {
            let mean = tree.get(child_id).mean_score();
            if mean > best_score {
                best_score = mean;
                best = child_id;
            }
        }

        let action = if best.is_some() {
            tree.get(best).action.clone()
        } else {
            let mut action = A::default();
            let mut playout = P::from_state(&root.state);
            playout.generate_random(&mut action);
            action
        };

        self.tree = Some(tree);
        action
    }

    /// The tree built by the most recent search, for read-only inspection
    /// (statistics, [`write_dot`](crate::graphviz::write_dot)).
    pub fn tree(&self) -> Option<&SearchTree<S, A, E>> {
        self.tree.as_ref()
    }

    fn search(&self) -> SearchTree<S, A, E> {
        let mut tree: SearchTree<S, A, E> = SearchTree::new(self.root_state.clone());
        let mut rng = ChaCha20Rng::seed_from_u64(self.config.rng_seed);
        let budget = Duration::from_millis(self.config.time_budget_ms);
        let start = Instant::now();
        let mut iterations: u32 = 0;

        while start.elapsed() < budget || iterations < self.config.min_iterations {
            iterations += 1;

            // Selection: descend while every legal child already exists.
            let mut current = tree.root();
            while tree.get(current).fully_expanded() {
                current = tree.select_child(
                    current,
                    self.config.exploration_c,
                    self.config.min_visits_for_uct,
                    &mut rng,
                );
            }

            // A finished game is scored as it stands, without spending an
            // expansion or a playout. A childless node whose enumerator
            // was empty from birth gets the same treatment.
            let node = tree.get(current);
            if self.termination.is_terminal(&node.state)
                || (node.children.is_empty() && !node.expansion.has_next())
            {
                let score = self.scoring.score(&node.state);
                tree.backpropagate(current, score, &self.backprop);
                trace!(node = current.0, score, "terminal during selection");
                continue;
            }

            // Expansion, once the leaf has been sampled often enough.
            let visits = node.visits;
            let origin = if visits >= self.config.expansion_visit_threshold {
                Self::expand(&mut tree, current)
            } else {
                current
            };

            // Playout + backpropagation.
            let score = self.simulate(&tree.get(origin).state);
            tree.backpropagate(origin, score, &self.backprop);
            trace!(origin = origin.0, score, "simulation complete");
        }

        debug!(
            iterations,
            nodes = tree.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        tree
    }

    /// Turn the next untried action of `parent` into a linked child.
    fn expand(tree: &mut SearchTree<S, A, E>, parent: NodeId) -> NodeId {
        let node = tree.get_mut(parent);
        let action = node.next_action();
        let mut state = node.state.clone();
        action.apply(&mut state);
        tree.add_child(parent, state, action)
    }

    /// Play random moves from a clone of `from` until the game ends and
    /// score the final state.
    fn simulate(&self, from: &S) -> f32 {
        let mut state = from.clone();
        let mut action = A::default();

        while !self.termination.is_terminal(&state) {
            let mut playout = P::from_state(&state);
            playout.generate_random(&mut action);
            action.apply(&mut state);
        }

        self.scoring.score(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// One-shot bandit: pick an arm, the game ends, the arm's value is the
    /// score.
    #[derive(Debug, Clone)]
    struct ArmState {
        arms: Vec<f32>,
        picked: Option<usize>,
    }

    impl ArmState {
        fn new(arms: &[f32]) -> Self {
            Self {
                arms: arms.to_vec(),
                picked: None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct PickArm(usize);

    impl Action<ArmState> for PickArm {
        fn apply(&self, state: &mut ArmState) {
            state.picked = Some(self.0);
        }
    }

    struct ArmExpansion {
        next: usize,
        total: usize,
    }

    impl ExpansionStrategy<ArmState, PickArm> for ArmExpansion {
        fn from_state(state: &ArmState) -> Self {
            let total = if state.picked.is_some() {
                0
            } else {
                state.arms.len()
            };
            ArmExpansion { next: 0, total }
        }

        fn has_next(&self) -> bool {
            self.next < self.total
        }

        fn next_action(&mut self) -> PickArm {
            let action = PickArm(self.next);
            self.next += 1;
            action
        }
    }

    struct ArmPlayout {
        total: usize,
        rng: ChaCha20Rng,
    }

    impl PlayoutStrategy<ArmState, PickArm> for ArmPlayout {
        fn from_state(state: &ArmState) -> Self {
            ArmPlayout {
                total: state.arms.len(),
                rng: ChaCha20Rng::seed_from_u64(7),
            }
        }

        fn generate_random(&mut self, action: &mut PickArm) {
            action.0 = self.rng.gen_range(0..self.total);
        }
    }

    struct NoAdjust;

    impl Backpropagation<ArmState> for NoAdjust {
        fn adjust_score(&self, _state: &ArmState, score: f32) -> f32 {
            score
        }
    }

    struct ArmTermination;

    impl TerminationCheck<ArmState> for ArmTermination {
        fn is_terminal(&self, state: &ArmState) -> bool {
            state.picked.is_some()
        }
    }

    struct ArmScoring;

    impl Scoring<ArmState> for ArmScoring {
        fn score(&self, state: &ArmState) -> f32 {
            state.arms[state.picked.expect("scored before the game ended")]
        }
    }

    type ArmMcts = Mcts<ArmState, PickArm, ArmExpansion, ArmPlayout, NoAdjust, ArmTermination, ArmScoring>;

    fn engine(arms: &[f32], config: MctsConfig) -> ArmMcts {
        ArmMcts::new(ArmState::new(arms), NoAdjust, ArmTermination, ArmScoring)
            .with_config(config)
    }

    #[test]
    fn test_returns_highest_mean_arm() {
        let mut engine = engine(&[0.1, 0.9, 0.4], MctsConfig::for_testing());

        let action = engine.find_best_action();
        assert_eq!(action, PickArm(1));

        // The returned action is the argmax-mean root child.
        let tree = engine.tree().unwrap();
        let root = tree.get(tree.root());
        let best = root
            .children
            .iter()
            .map(|&id| tree.get(id))
            .max_by(|a, b| a.mean_score().partial_cmp(&b.mean_score()).unwrap())
            .unwrap();
        assert_eq!(best.action, action);
    }

    #[test]
    fn test_single_legal_move_is_returned() {
        let config = MctsConfig::for_testing().with_min_iterations(10);
        let mut engine = engine(&[0.3], config);

        assert_eq!(engine.find_best_action(), PickArm(0));
    }

    #[test]
    fn test_min_iterations_with_zero_budget() {
        let config = MctsConfig::default()
            .with_time_budget_ms(0)
            .with_min_iterations(500);
        let mut engine = engine(&[0.2, 0.8], config);
        engine.find_best_action();

        // Every iteration backpropagates through the root exactly once.
        let tree = engine.tree().unwrap();
        assert_eq!(tree.get(tree.root()).visits, 500);
    }

    #[test]
    fn test_zero_budget_zero_iterations_falls_back() {
        let config = MctsConfig::default()
            .with_time_budget_ms(0)
            .with_min_iterations(0);
        let mut engine = engine(&[0.2, 0.8], config);

        let action = engine.find_best_action();
        assert!(action.0 < 2);

        let tree = engine.tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).children.is_empty());
    }

    #[test]
    fn test_terminal_root_falls_back_without_growth() {
        let mut state = ArmState::new(&[0.5, 0.5]);
        PickArm(0).apply(&mut state);

        let config = MctsConfig::for_testing().with_min_iterations(10);
        let mut engine =
            ArmMcts::new(state, NoAdjust, ArmTermination, ArmScoring).with_config(config);

        let action = engine.find_best_action();
        assert!(action.0 < 2);

        // The root was scored directly each iteration; no expansion ran.
        let tree = engine.tree().unwrap();
        let root = tree.get(tree.root());
        assert!(root.children.is_empty());
        assert_eq!(root.visits, 10);
    }

    #[test]
    fn test_symmetric_arms_score_converges() {
        let mut engine = engine(&[0.5, 0.5, 0.5], MctsConfig::for_testing());
        engine.find_best_action();

        let tree = engine.tree().unwrap();
        let root = tree.get(tree.root());
        assert!((root.mean_score() - 0.5).abs() < 1e-6);
        for &child_id in &root.children {
            let child = tree.get(child_id);
            assert!(child.visits > 0);
            assert!((child.mean_score() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let run = || {
            let mut engine = engine(&[0.3, 0.6, 0.2, 0.9], MctsConfig::for_testing());
            let action = engine.find_best_action();
            let tree = engine.tree().unwrap();
            let visits: Vec<u32> = tree
                .get(tree.root())
                .children
                .iter()
                .map(|&id| tree.get(id).visits)
                .collect();
            (action, visits)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_repeated_searches_agree() {
        let mut engine = engine(&[0.3, 0.6, 0.2], MctsConfig::for_testing());

        let first = engine.find_best_action();
        let second = engine.find_best_action();
        assert_eq!(first, second);
    }

    #[test]
    fn test_visit_counts_are_consistent() {
        let mut engine = engine(&[0.1, 0.5, 0.9], MctsConfig::for_testing());
        engine.find_best_action();

        // A node's visits dominate the sum over its children; the node
        // itself can be a playout origin without producing a child.
        let tree = engine.tree().unwrap();
        for node in tree.arena() {
            let child_sum: u32 = node.children.iter().map(|&id| tree.get(id).visits).sum();
            assert!(node.visits >= child_sum);
            if node.visits > 0 {
                assert!(node.mean_score().is_finite());
            }
        }
    }
}
