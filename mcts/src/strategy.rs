//! Strategy traits implemented by the embedding game.
//!
//! The engine itself knows nothing about any particular game. Everything
//! game-specific (how actions change a state, which moves are legal, when
//! a game ends and what the outcome is worth) enters through the traits in
//! this module. All of them return plain values; an implementation that
//! produces illegal moves or never terminates is a bug in the embedder, not
//! a condition the engine detects or recovers from.

/// An action a player can execute on a state.
///
/// Applying an action transforms the state in place into its successor;
/// cloning the state first is the caller's business. `Default` exists only
/// to seed the root node's incoming action, which is never applied.
pub trait Action<S>: Clone + Default {
    /// Transform `state` into the successor this action leads to.
    fn apply(&self, state: &mut S);
}

/// Lazily enumerates the untried actions of a state.
///
/// Each tree node owns one instance, constructed from the node's state at
/// node birth. The sequence is finite, produced in a stable
/// implementation-defined order, and never rewinds: an action handed out by
/// [`next_action`](ExpansionStrategy::next_action) is not produced again by
/// the same instance.
///
/// An enumerator may be empty from the start (terminal or stuck position);
/// the engine scores such nodes directly instead of expanding them.
pub trait ExpansionStrategy<S, A>: Sized {
    /// Build an enumerator over the legal actions of `state`.
    ///
    /// The instance must not keep references into the tree; it owns
    /// whatever it needs (typically a copy of the relevant part of the
    /// state plus a cursor).
    fn from_state(state: &S) -> Self;

    /// Whether [`next_action`](ExpansionStrategy::next_action) can produce
    /// another untried action.
    fn has_next(&self) -> bool;

    /// Produce the next untried action.
    ///
    /// Only called after [`has_next`](ExpansionStrategy::has_next) returned
    /// true.
    fn next_action(&mut self) -> A;
}

/// Generates random actions during the playout phase.
///
/// A fresh instance is constructed from the current state for every playout
/// step, so construction must be cheap. Implementations that need
/// randomness carry their own explicitly seeded generator; the engine's RNG
/// is reserved for child selection.
pub trait PlayoutStrategy<S, A>: Sized {
    /// Build a playout policy for `state`.
    fn from_state(state: &S) -> Self;

    /// Write a random legal action for the current state into `action`.
    ///
    /// The no-children fallback of the driver may invoke this on a terminal
    /// state; implementations must not loop forever there.
    fn generate_random(&mut self, action: &mut A);
}

/// Adjusts a score while it is backpropagated.
///
/// The terminal score of a playout is passed through this hook once per
/// node on the path from the playout origin up to and including the root,
/// and the adjusted value is what the node accumulates. In alternating-play
/// games this is where a win for one side becomes a loss for the other
/// (typically `1.0 - score` on the opponent's plies); single-player games
/// return the score unchanged.
pub trait Backpropagation<S> {
    /// The score to apply at the node holding `state`.
    fn adjust_score(&self, state: &S, score: f32) -> f32;
}

/// Decides whether a state is the end of the game.
pub trait TerminationCheck<S> {
    /// True if `state` has no successors, i.e. the game is over.
    fn is_terminal(&self, state: &S) -> bool;
}

/// Scores a terminal state.
///
/// Conventionally the score lies in `[0, 1]` with 1 best for the player
/// the search is run for; the engine reports it into backpropagation
/// verbatim and enforces no range.
pub trait Scoring<S> {
    /// The value of the finished game `state`.
    fn score(&self, state: &S) -> f32;
}
