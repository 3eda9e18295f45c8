//! Ray attacks for rooks, bishops and queens.
//!
//! Each ray runs outward until it leaves the board or hits an occupied square.
//! The blocker itself is included; callers mask out their own pieces.

use crate::game_state::chess_types::{PieceKind, Square, SquareSet};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> SquareSet {
    trace_rays(square, &ROOK_DIRECTIONS, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> SquareSet {
    trace_rays(square, &BISHOP_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> SquareSet {
    SquareSet(rook_attacks(square, occupancy).0 | bishop_attacks(square, occupancy).0)
}

/// Ray attacks for a sliding `kind`; empty for non-sliders.
pub fn slider_attacks(kind: PieceKind, square: Square, occupancy: u64) -> SquareSet {
    match kind {
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => SquareSet::EMPTY,
    }
}

fn trace_rays(square: Square, directions: &[(i8, i8)], occupancy: u64) -> SquareSet {
    let mut attacks = 0u64;

    for &(d_file, d_rank) in directions {
        let mut cursor = square;
        while let Some(next) = cursor.offset(d_file, d_rank) {
            attacks |= next.bit();
            if occupancy & next.bit() != 0 {
                break;
            }
            cursor = next;
        }
    }

    SquareSet(attacks)
}
