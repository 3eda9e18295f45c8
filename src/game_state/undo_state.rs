use crate::game_state::game_status::GameStatus;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;

/// Single retraction record kept by the session for every applied move.
///
/// Positions are values, so the record stores the full snapshot from before
/// the move instead of piecemeal diffs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub position_before: Position,
    pub status_before: GameStatus,
}
