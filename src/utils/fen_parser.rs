//! FEN-to-Position parser.
//!
//! FEN carries no per-piece move history, so `has_moved` is inferred: a piece
//! off its starting square has moved, and a king or rook on its home square
//! counts as unmoved only while a castling right still refers to it.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut position = Position::new_empty();
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part, position.side_to_move)?;
    position.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock \"{halfmove_part}\"")))?;
    position.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number \"{fullmove_part}\"")))?;

    parse_board(board_part, &mut position)?;

    Ok(position)
}

fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = (7 - fen_rank_idx) as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file = file
                    .checked_add(empty_count as u8)
                    .filter(|&next| next <= 8)
                    .ok_or_else(|| invalid("rank has too many files"))?;
                continue;
            }

            if file >= 8 {
                return Err(invalid("rank has too many files"));
            }
            let kind = PieceKind::from_letter(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };

            let square =
                Square::new(file, rank).map_err(|_| invalid("rank has too many files"))?;
            if kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                return Err(invalid(&format!("pawn on back rank {square}")));
            }

            let mut piece = Piece::new(kind, color);
            piece.has_moved = infer_has_moved(square, piece, position.castling_rights);
            position
                .put_piece(square, piece)
                .map_err(|err| invalid(&err.to_string()))?;
            file += 1;
        }

        if file != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(())
}

pub(crate) fn infer_has_moved(square: Square, piece: Piece, rights: CastlingRights) -> bool {
    let home = piece.color.home_rank();
    match piece.kind {
        PieceKind::Pawn => square.rank() != piece.color.pawn_start_rank(),
        PieceKind::King => {
            let on_home = square.rank() == home && square.file() == 4;
            !(on_home && (rights.kingside(piece.color) || rights.queenside(piece.color)))
        }
        PieceKind::Rook => {
            if square.rank() != home {
                return true;
            }
            match square.file() {
                0 => !rights.queenside(piece.color),
                7 => !rights.kingside(piece.color),
                _ => true,
            }
        }
        PieceKind::Knight => !(square.rank() == home && matches!(square.file(), 1 | 6)),
        PieceKind::Bishop => !(square.rank() == home && matches!(square.file(), 2 | 5)),
        PieceKind::Queen => !(square.rank() == home && square.file() == 3),
    }
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side-to-move field \"{side_part}\""))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            _ => return Err(invalid(&format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str, side: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square: Square = en_passant_part
        .parse()
        .map_err(|_| invalid(&format!("en-passant square \"{en_passant_part}\"")))?;
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if square.rank() != expected_rank {
        return Err(invalid(&format!("en-passant square {square} on wrong rank")));
    }
    Ok(Some(square))
}
