//! A sequence-guessing game for exercising the engine end to end, like
//! opening a combination lock: each turn the player picks a number between
//! 0 and `max_choice`, the game ends after a fixed number of turns, and
//! the score is the fraction of picks matching a hidden target sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use mcts::{Action as _, Mcts, MctsConfig};

#[derive(Debug, Clone)]
pub struct SequenceState {
    turns: usize,
    max_choice: u32,
    chosen: Vec<u32>,
}

impl SequenceState {
    pub fn new(turns: usize, max_choice: u32) -> Self {
        Self {
            turns,
            max_choice,
            chosen: Vec::with_capacity(turns),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.chosen.len() == self.turns
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceAction(pub u32);

impl mcts::Action<SequenceState> for SequenceAction {
    fn apply(&self, state: &mut SequenceState) {
        state.chosen.push(self.0);
    }
}

/// Enumerates the choices from smallest to largest.
pub struct SequenceExpansion {
    next: u32,
    max: u32,
    complete: bool,
}

impl mcts::ExpansionStrategy<SequenceState, SequenceAction> for SequenceExpansion {
    fn from_state(state: &SequenceState) -> Self {
        Self {
            next: 0,
            max: state.max_choice,
            complete: state.is_complete(),
        }
    }

    fn has_next(&self) -> bool {
        !self.complete && self.next <= self.max
    }

    fn next_action(&mut self) -> SequenceAction {
        let action = SequenceAction(self.next);
        self.next += 1;
        action
    }
}

/// Draws a choice from a constant-seeded generator, so playouts are
/// reproducible across runs.
pub struct SequencePlayout {
    max: u32,
    rng: ChaCha20Rng,
}

impl mcts::PlayoutStrategy<SequenceState, SequenceAction> for SequencePlayout {
    fn from_state(state: &SequenceState) -> Self {
        Self {
            max: state.max_choice,
            rng: ChaCha20Rng::seed_from_u64(42),
        }
    }

    fn generate_random(&mut self, action: &mut SequenceAction) {
        action.0 = self.rng.gen_range(0..=self.max);
    }
}

/// Single-player game: scores pass through unchanged.
pub struct SequenceBackprop;

impl mcts::Backpropagation<SequenceState> for SequenceBackprop {
    fn adjust_score(&self, _state: &SequenceState, score: f32) -> f32 {
        score
    }
}

pub struct SequenceTermination;

impl mcts::TerminationCheck<SequenceState> for SequenceTermination {
    fn is_terminal(&self, state: &SequenceState) -> bool {
        state.is_complete()
    }
}

/// Each pick matching the target is worth `1 / turns` points.
pub struct SequenceScoring {
    target: Vec<u32>,
}

impl SequenceScoring {
    pub fn new(target: Vec<u32>) -> Self {
        Self { target }
    }
}

impl mcts::Scoring<SequenceState> for SequenceScoring {
    fn score(&self, state: &SequenceState) -> f32 {
        let matches = state
            .chosen
            .iter()
            .zip(&self.target)
            .filter(|(chosen, target)| chosen == target)
            .count();
        matches as f32 / state.chosen.len() as f32
    }
}

pub type SequenceMcts = Mcts<
    SequenceState,
    SequenceAction,
    SequenceExpansion,
    SequencePlayout,
    SequenceBackprop,
    SequenceTermination,
    SequenceScoring,
>;

/// Play a full game, one search per turn, and return the final score.
///
/// The hidden target is generated from `seed`; the searches themselves run
/// a fixed iteration count with a zero time budget, so a game's result is
/// reproducible.
pub fn play_game(turns: usize, max_choice: u32, seed: u64) -> f32 {
    let mut target_rng = ChaCha20Rng::seed_from_u64(seed);
    let target: Vec<u32> = (0..turns)
        .map(|_| target_rng.gen_range(0..=max_choice))
        .collect();

    let mut state = SequenceState::new(turns, max_choice);

    for _ in 0..turns {
        let mut engine = SequenceMcts::new(
            state.clone(),
            SequenceBackprop,
            SequenceTermination,
            SequenceScoring::new(target.clone()),
        )
        .with_config(
            MctsConfig::default()
                .with_time_budget_ms(0)
                .with_min_iterations(10_000),
        );

        let action = engine.find_best_action();
        action.apply(&mut state);
    }

    use mcts::Scoring as _;
    SequenceScoring::new(target).score(&state)
}
