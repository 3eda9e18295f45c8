//! Move value produced by generation and consumed by `Position::apply`.

use std::cmp::Ordering;
use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub is_capture: bool,
    pub is_castle: bool,
    pub is_en_passant: bool,
}

impl Move {
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            is_capture: false,
            is_castle: false,
            is_en_passant: false,
        }
    }

    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Self {
            is_capture: true,
            ..Self::quiet(from, to)
        }
    }

    #[inline]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub const fn castle(from: Square, to: Square) -> Self {
        Self {
            is_castle: true,
            ..Self::quiet(from, to)
        }
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Self {
            is_capture: true,
            is_en_passant: true,
            ..Self::quiet(from, to)
        }
    }

    /// Origin, then destination, then promotion piece. The flags only break
    /// ties so that ordering agrees with equality.
    fn sort_key(&self) -> (usize, usize, usize, bool, bool, bool) {
        (
            self.from.index(),
            self.to.index(),
            self.promotion.map_or(0, |kind| kind.index() + 1),
            self.is_capture,
            self.is_castle,
            self.is_en_passant,
        )
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Move {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::game_state::chess_types::{PieceKind, Square};

    #[test]
    fn moves_order_by_origin_then_destination() {
        let e2: Square = "e2".parse().expect("e2");
        let e3: Square = "e3".parse().expect("e3");
        let e4: Square = "e4".parse().expect("e4");
        let mut moves = vec![
            Move::quiet(e2, e4),
            Move::quiet(Square::G1, Square::F1),
            Move::quiet(e2, e3),
        ];
        moves.sort();
        assert_eq!(moves[0].to, Square::F1);
        assert_eq!(moves[1].to, e3);
        assert_eq!(moves[2].to, e4);
    }

    #[test]
    fn promotion_moves_print_with_piece_letter() {
        let e7: Square = "e7".parse().expect("e7");
        let mv = Move::quiet(e7, Square::E8).with_promotion(PieceKind::Queen);
        assert_eq!(mv.to_string(), "e7e8q");
    }
}
