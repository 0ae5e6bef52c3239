//! Monte Carlo Tree Search (MCTS) for sequential decision problems.
//!
//! This crate provides a game-agnostic MCTS implementation. The embedder
//! supplies the game rules through a small set of strategy traits and gets
//! back the action judged best for the state to move.
//!
//! # Overview
//!
//! Each search iteration runs four phases:
//!
//! 1. **Selection**: Traverse the tree with UCT (Upper Confidence bound
//!    applied to Trees) until a node is reached that still has untried
//!    actions. Nodes with few visits are selected uniformly at random
//!    instead, since the UCT exploration term is ill-behaved at tiny visit
//!    counts.
//! 2. **Expansion**: Once a node has been visited often enough, one untried
//!    action is drawn from its expansion strategy and a single child is
//!    added for it.
//! 3. **Playout**: From the expanded node (or the node itself while
//!    expansion is still deferred), random actions are applied until a
//!    terminal state is reached and scored.
//! 4. **Backpropagation**: Visit counts and score sums are updated along
//!    the path back to the root, with a per-node score adjustment hook for
//!    alternating-player games.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{Mcts, MctsConfig};
//! use games_tictactoe::{State, TicTacToeMcts, TicTacToeBackprop,
//!                       TicTacToeScoring, TicTacToeTermination};
//!
//! let board = State::new();
//! let player = board.current_player();
//! let mut engine = TicTacToeMcts::new(
//!     board,
//!     TicTacToeBackprop::new(player),
//!     TicTacToeTermination,
//!     TicTacToeScoring::new(player),
//! )
//! .with_config(MctsConfig::default().with_time_budget_ms(100));
//!
//! let action = engine.find_best_action();
//! println!("Best action: {}", action);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `time_budget_ms`: wall-clock budget per search (default: 500)
//! - `min_iterations`: iterations to run even past the budget (default: 0)
//! - `exploration_c`: UCT exploration constant (default: 0.5)
//! - `expansion_visit_threshold`: visits a leaf needs before it is expanded
//! - `min_visits_for_uct`: visits a node needs before UCT replaces random
//!   child selection
//! - `rng_seed`: seed of the per-search RNG, making searches reproducible
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           Mcts                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ SearchTree  │  │  strategies  │  │    MctsConfig      │  │
//! │  │  (arena)    │  │ (game rules) │  │ (budget, C, gates) │  │
//! │  └──────┬──────┘  └──────┬───────┘  └──────────┬─────────┘  │
//! │         │                │                     │            │
//! │         ▼                ▼                     ▼            │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │        select → expand → playout → backpropagate      │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The finished tree stays inspectable through [`Mcts::tree`] until the
//! next search; [`graphviz::write_dot`] renders it for debugging.

pub mod config;
pub mod graphviz;
pub mod node;
pub mod search;
pub mod strategy;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use graphviz::write_dot;
pub use node::{Node, NodeId};
pub use search::Mcts;
pub use strategy::{
    Action, Backpropagation, ExpansionStrategy, PlayoutStrategy, Scoring, TerminationCheck,
};
pub use tree::{SearchTree, TreeStats};
