//! Diagonal pawn capture tables, one per color.

use crate::game_state::chess_types::{Color, Square, SquareSet};

const WHITE_PAWN_ATTACKS: [u64; 64] = build_table(1);
const BLACK_PAWN_ATTACKS: [u64; 64] = build_table(-1);

/// Squares a pawn of `color` on `square` attacks, whether occupied or not.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> SquareSet {
    match color {
        Color::White => SquareSet(WHITE_PAWN_ATTACKS[square.index()]),
        Color::Black => SquareSet(BLACK_PAWN_ATTACKS[square.index()]),
    }
}

const fn build_table(forward: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + forward;
        let mut attacks = 0u64;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (rank * 8 + file + 1);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
