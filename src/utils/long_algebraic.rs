//! Long algebraic move text ("e2e4", "e7e8q").
//!
//! Parsing only yields coordinates and an optional promotion piece; turning
//! that into a concrete [`Move`] needs the position's legal move list, which
//! is the session's job.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::Move;

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = format!("{}{}", mv.from, mv.to);
    if let Some(kind) = mv.promotion {
        out.push(kind.letter());
    }
    out
}

pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraic(text.to_owned()));
    }

    let from: Square = text[0..2].parse()?;
    let to: Square = text[2..4].parse()?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_letter(ch) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(ChessErrors::InvalidAlgebraic(text.to_owned())),
        },
    };

    Ok((from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let (from, to, promotion) = parse_long_algebraic("g1f3").expect("g1f3");
        assert_eq!((from, to, promotion), (Square::G1, "f3".parse().expect("f3"), None));

        let (_, to, promotion) = parse_long_algebraic("b7b8N").expect("b7b8N");
        assert_eq!(to, Square::B8);
        assert_eq!(promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "e2", "e2e9", "e7e8k", "e7e8qq", "é2e4"] {
            assert!(parse_long_algebraic(text).is_err(), "{text} should not parse");
        }
    }
}
