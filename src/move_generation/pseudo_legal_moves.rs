//! Geometry-only move generation.
//!
//! Each piece kind has one pure generator; `pseudo_legal_moves` dispatches
//! through a table indexed by `PieceKind::index`. None of this consults check
//! status, so the legality filter and the attack map can both build on it
//! without recursion.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::moves::leaper_attacks::{king_attacks, knight_attacks};
use crate::moves::pawn_attacks::pawn_attacks;
use crate::moves::slider_attacks::slider_attacks;

type GenerateFn = fn(&Position, Square, Piece, &mut Vec<Move>);

const GENERATORS: [GenerateFn; 6] = [
    generate_pawn_moves,
    generate_knight_moves,
    generate_slider_moves,
    generate_slider_moves,
    generate_slider_moves,
    generate_king_moves,
];

/// Candidate moves for the piece on `square`, in ascending destination order.
/// Empty when the square is empty. The piece's own color is used, whoever is
/// to move.
pub fn pseudo_legal_moves(position: &Position, square: Square) -> Vec<Move> {
    let Some(piece) = position.piece_at(square) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(28);
    GENERATORS[piece.kind.index()](position, square, piece, &mut out);
    out.sort();
    out
}

/// Capture-style reach of `piece` standing on `square`: squares it could
/// capture on, including empty ones and ones held by its own side.
pub fn attacks_from(position: &Position, square: Square, piece: Piece) -> SquareSet {
    attacks_with_occupancy(square, piece, position.occupancy_all())
}

/// [`attacks_from`] with the board occupancy supplied by the caller.
pub fn attacks_with_occupancy(square: Square, piece: Piece, occupancy: u64) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::King => king_attacks(square),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            slider_attacks(piece.kind, square, occupancy)
        }
    }
}

fn push_targets(
    position: &Position,
    from: Square,
    piece: Piece,
    targets: SquareSet,
    out: &mut Vec<Move>,
) {
    let own = position.occupancy(piece.color);
    let enemy = position.occupancy(piece.color.opposite());

    for to in SquareSet(targets.0 & !own).iter() {
        if enemy & to.bit() != 0 {
            out.push(Move::capture(from, to));
        } else {
            out.push(Move::quiet(from, to));
        }
    }
}

fn generate_knight_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(position, from, piece, knight_attacks(from), out);
}

fn generate_slider_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<Move>) {
    let rays = slider_attacks(piece.kind, from, position.occupancy_all());
    push_targets(position, from, piece, rays, out);
}

fn generate_king_moves(position: &Position, from: Square, piece: Piece, out: &mut Vec<Move>) {
    push_targets(position, from, piece, king_attacks(from), out);
    generate_castling_candidates(position, from, piece, out);
}

/// Castling needs the right, the king on e1/e8, the matching rook in its
/// corner and empty squares in between. Attacked squares are checked later.
fn generate_castling_candidates(position: &Position, from: Square, king: Piece, out: &mut Vec<Move>) {
    let home = king.color.home_rank();
    if from.rank() != home || from.file() != 4 {
        return;
    }

    let rights = position.castling_rights;
    let empty = |files: &[u8]| {
        files.iter().all(|&file| {
            Square::new(file, home).is_ok_and(|square| !position.is_square_occupied(square))
        })
    };
    let own_rook_on = |file: u8| {
        Square::new(file, home)
            .ok()
            .and_then(|square| position.piece_at(square))
            .is_some_and(|piece| piece.kind == PieceKind::Rook && piece.color == king.color)
    };

    if rights.kingside(king.color) && own_rook_on(7) && empty(&[5, 6]) {
        if let Ok(to) = Square::new(6, home) {
            out.push(Move::castle(from, to));
        }
    }
    if rights.queenside(king.color) && own_rook_on(0) && empty(&[1, 2, 3]) {
        if let Ok(to) = Square::new(2, home) {
            out.push(Move::castle(from, to));
        }
    }
}

fn generate_pawn_moves(position: &Position, from: Square, pawn: Piece, out: &mut Vec<Move>) {
    let forward: i8 = match pawn.color {
        Color::White => 1,
        Color::Black => -1,
    };
    let enemy = position.occupancy(pawn.color.opposite());

    if let Some(one_step) = from.offset(0, forward) {
        if !position.is_square_occupied(one_step) {
            push_pawn_move(Move::quiet(from, one_step), pawn.color, out);

            if from.rank() == pawn.color.pawn_start_rank() {
                if let Some(two_step) = from.offset(0, 2 * forward) {
                    if !position.is_square_occupied(two_step) {
                        out.push(Move::quiet(from, two_step));
                    }
                }
            }
        }
    }

    for to in pawn_attacks(pawn.color, from).iter() {
        if enemy & to.bit() != 0 {
            push_pawn_move(Move::capture(from, to), pawn.color, out);
        } else if position.en_passant_square == Some(to)
            && has_en_passant_victim(position, from, to, pawn)
        {
            out.push(Move::en_passant(from, to));
        }
    }
}

/// Expand a pawn move onto the last rank into one move per promotion piece.
fn push_pawn_move(mv: Move, color: Color, out: &mut Vec<Move>) {
    if mv.to.rank() == color.promotion_rank() {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&kind| mv.with_promotion(kind)));
    } else {
        out.push(mv);
    }
}

fn has_en_passant_victim(position: &Position, from: Square, to: Square, pawn: Piece) -> bool {
    Square::new(to.file(), from.rank())
        .ok()
        .and_then(|square| position.piece_at(square))
        .is_some_and(|victim| victim.kind == PieceKind::Pawn && victim.color != pawn.color)
}
