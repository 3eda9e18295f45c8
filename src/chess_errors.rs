//! Errors used throughout the rules core.
//!
//! `ChessErrors` is the single error type returned by position handling,
//! parsing utilities, move application, sessions and record codecs.
//!
//! - `InvalidSquare` / `InvalidAlgebraic` indicate bad coordinates (usually a
//!   programming error on the caller's side).
//! - `IllegalMove`, `AmbiguousPromotion` and `GameOver` reject an attempted
//!   action; the game is left exactly as it was.
//! - `MalformedRecord`, `InvalidFen` and `UnknownFileExtension` abort a load;
//!   the previously loaded game stays in place.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::game_status::GameStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// Zero-based coordinates outside `0..=7`.
    #[error("square ({file}, {rank}) is not on the board")]
    InvalidSquare { file: u8, rank: u8 },

    #[error("invalid algebraic coordinate \"{0}\"")]
    InvalidAlgebraic(String),

    /// The attempted move is not among the legal moves of the position.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// A pawn reached the last rank and no promotion piece was chosen.
    #[error("move {from}{to} needs a promotion piece")]
    AmbiguousPromotion { from: Square, to: Square },

    #[error("no piece on {0}")]
    NoPieceOnSquare(Square),

    /// A color may own a single king.
    #[error("{color} already has a king on {square}")]
    DuplicateKing { color: Color, square: Square },

    #[error("the king on {0} cannot be removed")]
    CannotRemoveKing(Square),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// The game already reached a terminal state.
    #[error("game is over ({0})")]
    GameOver(GameStatus),

    #[error("no move to undo")]
    NothingToUndo,

    #[error("no codec registered for \"{0}\"")]
    UnknownFileExtension(String),
}

pub type ChessResult<T> = Result<T, ChessErrors>;
