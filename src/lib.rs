//! A chess rules and search engine.
//!
//! [`Board`] owns the full game state (position, move and hash histories,
//! draw and terminal classification) and is driven by caller-chosen legal
//! moves. [`SearchEngine`] selects a move for the side to move within a
//! time budget.

pub mod board;
pub mod eval;
pub mod search;
pub mod zobrist;

pub use board::{Board, Color, GameState, Move, MoveList, Outcome, Piece, Square};
pub use eval::Evaluator;
pub use search::{OpeningBook, SearchEngine, SearchOptions};
