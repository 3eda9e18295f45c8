//! Zobrist hashing for position identity.
//!
//! Keys come from a fixed splitmix64 seed so hashes are stable across runs.
//! The attack-map cache uses them to recognise positions it has seen.

use std::sync::OnceLock;

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::position::Position;

struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color.iter_mut() {
            for key in kind.iter_mut() {
                *key = splitmix64(&mut seed);
            }
        }
    }

    let black_to_move = splitmix64(&mut seed);
    let castling = std::array::from_fn(|_| splitmix64(&mut seed));
    let en_passant_file = std::array::from_fn(|_| splitmix64(&mut seed));

    ZobristTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
pub fn piece_square_key(color: Color, kind: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][kind.index()][square.index()]
}

/// Full recomputation; positions are small enough that no incremental
/// update is kept.
pub fn compute_zobrist_key(position: &Position) -> u64 {
    let tables = tables();
    let mut key = position
        .all_pieces()
        .fold(0u64, |acc, (square, piece)| {
            acc ^ piece_square_key(piece.color, piece.kind, square)
        });

    if position.side_to_move == Color::Black {
        key ^= tables.black_to_move;
    }
    key ^= tables.castling[position.castling_rights.bits() as usize];
    if let Some(square) = position.en_passant_square {
        key ^= tables.en_passant_file[square.file() as usize];
    }

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::chess_types::Square;
    use crate::game_state::position::Position;
    use crate::moves::chess_move::Move;

    #[test]
    fn transposed_move_orders_share_a_key() {
        let start = Position::new_game();
        let g1: Square = Square::G1;
        let f3: Square = "f3".parse().expect("f3");
        let b8: Square = Square::B8;
        let c6: Square = "c6".parse().expect("c6");
        let b1: Square = Square::B1;
        let c3: Square = "c3".parse().expect("c3");
        let g8: Square = Square::G8;
        let f6: Square = "f6".parse().expect("f6");

        let line = |moves: &[(Square, Square)]| {
            moves.iter().fold(start.clone(), |pos, (from, to)| {
                pos.apply(&Move::quiet(*from, *to)).expect("developing move")
            })
        };

        let a = line(&[(g1, f3), (b8, c6), (b1, c3), (g8, f6)]);
        let b = line(&[(b1, c3), (g8, f6), (g1, f3), (b8, c6)]);
        assert_eq!(compute_zobrist_key(&a), compute_zobrist_key(&b));
        assert_ne!(compute_zobrist_key(&a), compute_zobrist_key(&start));
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let white = Position::new_game();
        let mut black = white.clone();
        black.side_to_move = crate::game_state::chess_types::Color::Black;
        assert_ne!(compute_zobrist_key(&white), compute_zobrist_key(&black));
    }
}
