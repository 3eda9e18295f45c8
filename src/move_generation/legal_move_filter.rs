//! Legal move filtering.
//!
//! Every pseudo-legal candidate is applied to a scratch copy of the position
//! and dropped when the mover's king ends up attacked. En-passant discoveries
//! fall out of this for free because the scratch copy has both pawns removed.
//! Castling gets the two extra checks (not out of check, not through an
//! attacked square) before the usual landing-square test.

use tracing::warn;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::attack_map::{is_king_in_check, is_square_attacked};
use crate::move_generation::pseudo_legal_moves::pseudo_legal_moves;
use crate::moves::chess_move::Move;

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: Move,
    pub position_after: Position,
}

/// Legal moves for the piece on `square`, ascending by destination.
///
/// Empty when the square is empty or holds a piece of the side not to move.
pub fn legal_moves(position: &Position, square: Square) -> Vec<Move> {
    generate_for_square(position, square)
        .into_iter()
        .map(|generated| generated.mv)
        .collect()
}

/// Legal moves of the side to move, ascending by origin then destination.
pub fn all_legal_moves(position: &Position) -> Vec<Move> {
    generate_legal_moves(position)
        .into_iter()
        .map(|generated| generated.mv)
        .collect()
}

/// Like [`all_legal_moves`] but keeps the resulting positions.
pub fn generate_legal_moves(position: &Position) -> Vec<GeneratedMove> {
    let side = position.side_to_move;
    let origins: Vec<Square> = position.pieces(side).map(|(square, _)| square).collect();

    let mut out = Vec::with_capacity(64);
    for origin in origins {
        out.extend(generate_for_square(position, origin));
    }
    out
}

/// True as soon as one legal move is found.
pub fn has_any_legal_move(position: &Position) -> bool {
    position
        .pieces(position.side_to_move)
        .any(|(square, _)| !generate_for_square(position, square).is_empty())
}

/// Pick the legal move matching a from/to/promotion request.
///
/// A pawn reaching the last rank without a chosen piece matches four moves
/// and fails with `AmbiguousPromotion`; the caller must resupply.
pub fn resolve_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<GeneratedMove> {
    let mut matching: Vec<GeneratedMove> = generate_for_square(position, from)
        .into_iter()
        .filter(|generated| generated.mv.to == to)
        .filter(|generated| promotion.is_none() || generated.mv.promotion == promotion)
        .collect();

    match matching.len() {
        0 => Err(ChessErrors::IllegalMove { from, to }),
        1 => Ok(matching.remove(0)),
        _ => Err(ChessErrors::AmbiguousPromotion { from, to }),
    }
}

fn generate_for_square(position: &Position, square: Square) -> Vec<GeneratedMove> {
    let side = position.side_to_move;
    match position.piece_at(square) {
        Some(piece) if piece.color == side => {}
        _ => return Vec::new(),
    }

    let mut in_check: Option<bool> = None;
    let mut out = Vec::new();

    for mv in pseudo_legal_moves(position, square) {
        if mv.is_castle {
            let checked = *in_check.get_or_insert_with(|| is_king_in_check(position, side));
            if checked || castle_path_attacked(position, &mv, side) {
                continue;
            }
        }

        let next = match position.apply(&mv) {
            Ok(next) => next,
            Err(err) => {
                warn!(%mv, %err, "pseudo-legal move failed to apply");
                continue;
            }
        };

        if !is_king_in_check(&next, side) {
            out.push(GeneratedMove {
                mv,
                position_after: next,
            });
        }
    }

    out
}

/// The square the king crosses (f- or d-file). The landing square is covered
/// by the general self-check test.
fn castle_path_attacked(position: &Position, mv: &Move, side: Color) -> bool {
    let crossed_file = (mv.from.file() + mv.to.file()) / 2;
    Square::new(crossed_file, mv.from.rank())
        .map(|crossed| is_square_attacked(position, crossed, side.opposite()))
        .unwrap_or(true)
}
