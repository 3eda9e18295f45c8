use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn generate_fen(position: &Position) -> String {
    let side_to_move = match position.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = position
        .en_passant_square
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(position),
        side_to_move,
        generate_castling_field(position.castling_rights),
        en_passant,
        position.halfmove_clock,
        position.fullmove_number
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let square = Square::from_index_unchecked(rank * 8 + file);
            if let Some(piece) = position.piece_at(square) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    for (allowed, ch) in [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ] {
        if allowed {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trip_starting_position_fen() {
        let parsed = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, STARTING_POSITION_FEN);
        assert_eq!(parse_fen(&generated).expect("generated FEN should parse"), parsed);
    }

    #[test]
    fn round_trip_custom_position_fen() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = parse_fen(fen).expect("custom FEN should parse");
        let generated = generate_fen(&parsed);

        assert_eq!(generated, fen);
        let reparsed = parse_fen(&generated).expect("generated FEN should parse");
        assert_eq!(reparsed.side_to_move, Color::Black);
        assert!(reparsed.castling_rights.black_kingside);
        assert!(!reparsed.castling_rights.white_kingside);
        assert_eq!(reparsed.halfmove_clock, 4);
        assert_eq!(reparsed.fullmove_number, 6);
    }

    #[test]
    fn en_passant_target_is_written() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3";
        let parsed = parse_fen(fen).expect("fen");
        assert_eq!(generate_fen(&parsed), fen);
    }
}
