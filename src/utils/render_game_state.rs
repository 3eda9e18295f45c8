//! Terminal-oriented Unicode board renderer for diagnostics and the console.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Render the board with White at the bottom.
pub fn render_position(position: &Position) -> String {
    render_with_marks(position, SquareSet::EMPTY)
}

/// Render the board, drawing `marks` on empty squares as `×`. Occupied
/// squares keep their piece glyph.
pub fn render_with_marks(position: &Position, marks: SquareSet) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let square = Square::from_index_unchecked(rank * 8 + file);
            match position.piece_at(square) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None if marks.contains(square) => out.push('×'),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_only_show_on_empty_squares() {
        let position = Position::from_fen("8/8/8/8/8/5n2/8/4K3 w - - 0 1").expect("fen");
        let marks: SquareSet = ["e2", "e1"]
            .iter()
            .map(|text| text.parse::<Square>().expect("square"))
            .collect();
        let text = render_with_marks(&position, marks);
        let rank_two = text.lines().nth(7).expect("rank 2 line");
        let rank_one = text.lines().nth(8).expect("rank 1 line");
        assert_eq!(rank_two, "2 · · · · × · · · 2");
        assert_eq!(rank_one, "1 · · · · ♔ · · · 1");
        assert!(text.contains('♞'));
    }
}
