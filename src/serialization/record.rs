//! Persisted game record.
//!
//! The record is plain data with string coordinates and piece names so that
//! tooling outside the rules core can read and write it. Validation happens
//! when a record is turned back into a [`Position`](crate::game_state::position::Position).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{CastlingRights, Color};

/// Player name, timestamps and score of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub username: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// From White's point of view: 1 for a White win, -1 for a Black win,
    /// 0 for draws and unfinished games.
    #[serde(default)]
    pub score: i32,
}

impl GameInfo {
    /// Metadata for a game starting now.
    pub fn new(username: impl Into<String>) -> Self {
        Self::started_at(username, Utc::now())
    }

    pub fn started_at(username: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            start_time,
            end_time: None,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    /// Algebraic coordinate, e.g. "e1".
    pub square: String,
    /// Lower-case piece name, e.g. "knight".
    pub kind: String,
    pub color: Color,
    #[serde(default)]
    pub has_moved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub pieces: Vec<PieceRecord>,
    pub side_to_move: Color,
    #[serde(default)]
    pub castling_rights: CastlingRights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_passant_square: Option<String>,
    #[serde(default)]
    pub halfmove_clock: u16,
    #[serde(default = "first_move")]
    pub fullmove_number: u16,
}

fn first_move() -> u16 {
    1
}

/// Snapshot plus optional replay data and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub info: GameInfo,
    /// Position at the time the record was written.
    pub position: PositionRecord,
    /// Position the history starts from. Without it the history is kept for
    /// reference only and `position` is loaded directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_position: Option<PositionRecord>,
    /// Moves in long algebraic notation ("e2e4", "e7e8q").
    #[serde(default)]
    pub history: Vec<String>,
}
