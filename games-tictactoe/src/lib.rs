//! TicTacToe reference domain for the `mcts` search engine.
//!
//! This crate provides a complete 3×3 board game wired into every strategy
//! trait the engine consumes, demonstrating how to embed an alternating
//! two-player game: the score-adjustment hook inverts the terminal score on
//! the opponent's plies so that each node accumulates value from the
//! perspective of the player who moved into it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_tictactoe::{Player, State, TicTacToeBackprop, TicTacToeMcts,
//!                       TicTacToeScoring, TicTacToeTermination};
//!
//! let board = State::new();
//! let mut engine = TicTacToeMcts::new(
//!     board,
//!     TicTacToeBackprop::new(Player::X),
//!     TicTacToeTermination,
//!     TicTacToeScoring::new(Player::X),
//! );
//! let action = engine.find_best_action();
//! ```

use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Seed stem of the playout RNG; mixed with the board so distinct
/// positions roll out differently while staying reproducible.
const PLAYOUT_SEED: u64 = 42;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The opposing side.
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Player),
    Draw,
}

/// TicTacToe game state: the board, the side to move and the outcome once
/// the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    board: [Option<Player>; 9],
    current_player: Player,
    outcome: Option<Outcome>,
}

impl State {
    /// Create an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current_player: Player::X,
            outcome: None,
        }
    }

    /// The side to move. Alternates on every move, including the move that
    /// ends the game, so the side that just moved is always
    /// `current_player().other()`.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The outcome, or `None` while the game is running.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Check if the game is over.
    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// The raw board cells, row-major.
    pub fn cells(&self) -> &[Option<Player>; 9] {
        &self.board
    }

    /// Get legal moves (empty positions), in ascending order.
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize].is_none())
            .collect()
    }

    /// Place the current player's piece at `position`.
    ///
    /// Finished games and occupied or out-of-range positions leave the
    /// state unchanged.
    pub fn make_move(&mut self, position: u8) {
        if self.is_done() || position >= 9 || self.board[position as usize].is_some() {
            return;
        }

        self.board[position as usize] = Some(self.current_player);
        self.outcome = Self::check_outcome(&self.board);
        self.current_player = self.current_player.other();
    }

    /// Scan the board for a finished game.
    fn check_outcome(board: &[Option<Player>; 9]) -> Option<Outcome> {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if let Some(player) = board[a] {
                if board[b] == Some(player) && board[c] == Some(player) {
                    return Some(Outcome::Won(player));
                }
            }
        }

        if board.iter().all(|cell| cell.is_some()) {
            return Some(Outcome::Draw);
        }

        None
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let cell = match self.board[row * 3 + col] {
                    Some(Player::X) => 'X',
                    Some(Player::O) => 'O',
                    None => '.',
                };
                write!(f, "{}", cell)?;
                if col < 2 {
                    write!(f, " ")?;
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// TicTacToe action: place a piece at a board position (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Place(u8),
}

impl Action {
    /// Get the position for this action.
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::Place(0)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "place {}", self.position())
    }
}

impl mcts::Action<State> for Action {
    fn apply(&self, state: &mut State) {
        state.make_move(self.position());
    }
}

/// Enumerates the empty positions of a board, lowest first.
pub struct TicTacToeExpansion {
    moves: Vec<u8>,
    next: usize,
}

impl mcts::ExpansionStrategy<State, Action> for TicTacToeExpansion {
    fn from_state(state: &State) -> Self {
        Self {
            moves: state.legal_moves(),
            next: 0,
        }
    }

    fn has_next(&self) -> bool {
        self.next < self.moves.len()
    }

    fn next_action(&mut self) -> Action {
        let action = Action::Place(self.moves[self.next]);
        self.next += 1;
        action
    }
}

/// Picks a uniformly random empty position.
///
/// The RNG seed is derived from the board, so playouts are deterministic
/// per position without being the same move everywhere.
pub struct TicTacToePlayout {
    moves: Vec<u8>,
    rng: ChaCha20Rng,
}

impl mcts::PlayoutStrategy<State, Action> for TicTacToePlayout {
    fn from_state(state: &State) -> Self {
        let mut seed = PLAYOUT_SEED;
        for cell in state.cells() {
            let code = match cell {
                None => 0u64,
                Some(Player::X) => 1,
                Some(Player::O) => 2,
            };
            seed = seed.wrapping_mul(31).wrapping_add(code + 1);
        }

        Self {
            moves: state.legal_moves(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn generate_random(&mut self, action: &mut Action) {
        // A finished board has no legal moves; leave the action untouched.
        if let Some(&pos) = self.moves.choose(&mut self.rng) {
            *action = Action::Place(pos);
        }
    }
}

/// Score adjustment for alternating play.
///
/// Keeps the terminal score at nodes the perspective player moved into and
/// inverts it at the opponent's, so every node accumulates value from the
/// viewpoint of the side that chose it.
pub struct TicTacToeBackprop {
    perspective: Player,
}

impl TicTacToeBackprop {
    pub fn new(perspective: Player) -> Self {
        Self { perspective }
    }
}

impl mcts::Backpropagation<State> for TicTacToeBackprop {
    fn adjust_score(&self, state: &State, score: f32) -> f32 {
        if state.current_player().other() == self.perspective {
            score
        } else {
            1.0 - score
        }
    }
}

/// The game ends once the board has an outcome.
pub struct TicTacToeTermination;

impl mcts::TerminationCheck<State> for TicTacToeTermination {
    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }
}

/// Win 1.0, draw 0.5, loss 0.0 for the perspective player.
pub struct TicTacToeScoring {
    perspective: Player,
}

impl TicTacToeScoring {
    pub fn new(perspective: Player) -> Self {
        Self { perspective }
    }
}

impl mcts::Scoring<State> for TicTacToeScoring {
    fn score(&self, state: &State) -> f32 {
        match state.outcome() {
            Some(Outcome::Won(player)) if player == self.perspective => 1.0,
            Some(Outcome::Won(_)) => 0.0,
            _ => 0.5,
        }
    }
}

/// Engine configured with all the strategies from this crate.
pub type TicTacToeMcts = mcts::Mcts<
    State,
    Action,
    TicTacToeExpansion,
    TicTacToePlayout,
    TicTacToeBackprop,
    TicTacToeTermination,
    TicTacToeScoring,
>;
