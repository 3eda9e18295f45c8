//! Precomputed attack tables for the fixed-offset pieces (knight and king).
//!
//! Both tables are built at compile time from their offset lists, so the
//! board-bound filtering happens once rather than per query.

use crate::game_state::chess_types::{Square, SquareSet};

/// The eight `(d_file, d_rank)` knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The eight adjacent king steps.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_ATTACKS: [u64; 64] = build_table(&KNIGHT_OFFSETS);
const KING_ATTACKS: [u64; 64] = build_table(&KING_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> SquareSet {
    SquareSet(KNIGHT_ATTACKS[square.index()])
}

#[inline]
pub const fn king_attacks(square: Square) -> SquareSet {
    SquareSet(KING_ATTACKS[square.index()])
}

const fn build_table(offsets: &[(i8, i8); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let to_file = file + offsets[i].0;
            let to_rank = rank + offsets[i].1;
            if to_file >= 0 && to_file < 8 && to_rank >= 0 && to_rank < 8 {
                attacks |= 1u64 << (to_rank as u32 * 8 + to_file as u32);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
