//! Conversion between [`Position`] and the persisted record types.
//!
//! Loading validates everything a hand-edited file could get wrong: unknown
//! piece names, coordinates off the board, two pieces on one square, more
//! than one king per side, pawns on a back rank and malformed en-passant
//! squares. Every such problem is reported as `MalformedRecord`.

use tracing::debug;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_status::evaluate;
use crate::game_state::position::Position;
use crate::game_state::undo_state::UndoState;
use crate::move_generation::legal_move_filter::resolve_move;
use crate::moves::chess_move::Move;
use crate::serialization::record::{GameInfo, GameRecord, PieceRecord, PositionRecord};
use crate::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};

/// Snapshot-only record of `position`.
pub fn to_record(position: &Position, info: &GameInfo) -> GameRecord {
    GameRecord {
        info: info.clone(),
        position: position_to_record(position),
        initial_position: None,
        history: Vec::new(),
    }
}

/// Record with enough data to replay the game from `initial`.
pub fn to_record_with_history(
    initial: &Position,
    current: &Position,
    history: &[Move],
    info: &GameInfo,
) -> GameRecord {
    GameRecord {
        info: info.clone(),
        position: position_to_record(current),
        initial_position: Some(position_to_record(initial)),
        history: history.iter().map(move_to_long_algebraic).collect(),
    }
}

/// Position stored in `record`, loaded directly from the snapshot.
pub fn from_record(record: &GameRecord) -> ChessResult<Position> {
    position_from_record(&record.position)
}

pub fn position_to_record(position: &Position) -> PositionRecord {
    PositionRecord {
        pieces: position
            .all_pieces()
            .map(|(square, piece)| PieceRecord {
                square: square.to_string(),
                kind: piece.kind.type_name().to_owned(),
                color: piece.color,
                has_moved: piece.has_moved,
            })
            .collect(),
        side_to_move: position.side_to_move,
        castling_rights: position.castling_rights,
        en_passant_square: position.en_passant_square.map(|square| square.to_string()),
        halfmove_clock: position.halfmove_clock,
        fullmove_number: position.fullmove_number,
    }
}

pub fn position_from_record(record: &PositionRecord) -> ChessResult<Position> {
    let mut position = Position::new_empty();

    for entry in &record.pieces {
        let square = parse_square(&entry.square)?;
        let kind: PieceKind = entry.kind.parse()?;
        if kind == PieceKind::Pawn && matches!(square.rank(), 0 | 7) {
            return Err(malformed(format!("pawn on back rank {square}")));
        }
        if position.is_square_occupied(square) {
            return Err(malformed(format!("two pieces on {square}")));
        }

        let piece = Piece {
            kind,
            color: entry.color,
            has_moved: entry.has_moved,
        };
        position.put_piece(square, piece).map_err(|err| match err {
            ChessErrors::DuplicateKing { color, .. } => {
                malformed(format!("{color} has more than one king"))
            }
            other => malformed(other.to_string()),
        })?;
    }

    position.side_to_move = record.side_to_move;
    position.castling_rights = record.castling_rights;
    position.halfmove_clock = record.halfmove_clock;
    position.fullmove_number = record.fullmove_number.max(1);
    position.en_passant_square = match &record.en_passant_square {
        None => None,
        Some(text) => {
            let square = parse_square(text)?;
            let expected_rank = match record.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if square.rank() != expected_rank {
                return Err(malformed(format!("en-passant square {square} on wrong rank")));
            }
            Some(square)
        }
    };

    Ok(position)
}

/// A game rebuilt move by move from a record's initial snapshot.
#[derive(Debug, Clone)]
pub struct ReplayedGame {
    pub initial: Position,
    pub position: Position,
    pub history: Vec<UndoState>,
}

/// Rebuild the game from `record.initial_position` by playing every history
/// move through the legality filter. The result must land on the stored
/// snapshot. Records without an initial snapshot load the snapshot directly
/// and come back with an empty history.
pub fn replay_record(record: &GameRecord) -> ChessResult<ReplayedGame> {
    let target = from_record(record)?;
    let Some(initial_record) = &record.initial_position else {
        return Ok(ReplayedGame {
            initial: target.clone(),
            position: target,
            history: Vec::new(),
        });
    };

    let initial = position_from_record(initial_record)?;
    let mut position = initial.clone();
    let mut history = Vec::with_capacity(record.history.len());

    for (ply, text) in record.history.iter().enumerate() {
        let (from, to, promotion) = parse_long_algebraic(text)
            .map_err(|err| malformed(format!("history move {}: {err}", ply + 1)))?;
        let generated = resolve_move(&position, from, to, promotion)
            .map_err(|err| malformed(format!("history move {} \"{text}\": {err}", ply + 1)))?;

        let status_before = evaluate(&position);
        if status_before.is_terminal() {
            return Err(malformed(format!(
                "history continues after the game ended ({status_before})"
            )));
        }
        history.push(UndoState {
            mv: generated.mv,
            position_before: position,
            status_before,
        });
        position = generated.position_after;
    }

    if position != target {
        return Err(malformed(
            "replayed history does not reach the stored position".to_owned(),
        ));
    }

    debug!(plies = history.len(), "record replayed");
    Ok(ReplayedGame {
        initial,
        position,
        history,
    })
}

fn parse_square(text: &str) -> ChessResult<Square> {
    text.parse()
        .map_err(|_| malformed(format!("square \"{text}\" is not on the board")))
}

fn malformed(detail: String) -> ChessErrors {
    ChessErrors::MalformedRecord(detail)
}
