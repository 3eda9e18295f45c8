//! Board state container.
//!
//! `Position` is a plain value: applying a move returns a new position and
//! leaves the original untouched, so callers can keep snapshots for undo,
//! analysis, or rendering without coordination.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::zobrist;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Position {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting layout.
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Coordinate-checked lookup for callers holding raw file/rank pairs.
    pub fn piece_at_coords(&self, file: u8, rank: u8) -> ChessResult<Option<Piece>> {
        Ok(self.piece_at(Square::new(file, rank)?))
    }

    #[inline]
    pub fn is_square_occupied(&self, square: Square) -> bool {
        self.board[square.index()].is_some()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Pieces of `color` in ascending square order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.all_pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn all_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    pub fn occupancy(&self, color: Color) -> u64 {
        self.pieces(color).fold(0u64, |acc, (square, _)| acc | square.bit())
    }

    pub fn occupancy_all(&self) -> u64 {
        self.all_pieces().fold(0u64, |acc, (square, _)| acc | square.bit())
    }

    /// Zobrist key of the full position (pieces, side, rights, en passant).
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        zobrist::compute_zobrist_key(self)
    }

    /// Place `piece` on `square`, returning whatever stood there.
    ///
    /// A color may own at most one king; replacing a king is refused so kings
    /// only ever leave the board through [`Position::new_empty`].
    pub fn put_piece(&mut self, square: Square, piece: Piece) -> ChessResult<Option<Piece>> {
        let previous = self.board[square.index()];
        if let Some(existing) = previous {
            if existing.kind == PieceKind::King {
                return Err(ChessErrors::CannotRemoveKing(square));
            }
        }
        if piece.kind == PieceKind::King {
            if let Some(king_sq) = self.king_square(piece.color) {
                return Err(ChessErrors::DuplicateKing {
                    color: piece.color,
                    square: king_sq,
                });
            }
        }
        self.board[square.index()] = Some(piece);
        Ok(previous)
    }

    /// Clear a square during setup. Kings cannot be removed.
    pub fn remove_piece(&mut self, square: Square) -> ChessResult<Option<Piece>> {
        match self.board[square.index()] {
            Some(piece) if piece.kind == PieceKind::King => Err(ChessErrors::CannotRemoveKing(square)),
            previous => {
                self.board[square.index()] = None;
                Ok(previous)
            }
        }
    }

    /// Mechanically apply `mv` and return the resulting position.
    ///
    /// Only structural consistency is checked (a piece of the side to move on
    /// the origin, no own piece or king on the target, promotion supplied
    /// exactly when a pawn reaches the last rank). Whether the move leaves the
    /// mover in check is the legality filter's concern. On error `self` is
    /// unchanged and nothing is returned.
    pub fn apply(&self, mv: &Move) -> ChessResult<Position> {
        let moving = self
            .piece_at(mv.from)
            .ok_or(ChessErrors::NoPieceOnSquare(mv.from))?;
        let illegal = ChessErrors::IllegalMove {
            from: mv.from,
            to: mv.to,
        };
        if moving.color != self.side_to_move || mv.from == mv.to {
            return Err(illegal);
        }

        let target = self.piece_at(mv.to);
        if let Some(target) = target {
            if target.color == moving.color || target.kind == PieceKind::King {
                return Err(illegal);
            }
        }

        let reaches_last_rank =
            moving.kind == PieceKind::Pawn && mv.to.rank() == moving.color.promotion_rank();
        match mv.promotion {
            None if reaches_last_rank => {
                return Err(ChessErrors::AmbiguousPromotion {
                    from: mv.from,
                    to: mv.to,
                })
            }
            Some(kind) if !reaches_last_rank || !PieceKind::PROMOTIONS.contains(&kind) => {
                return Err(illegal)
            }
            _ => {}
        }

        let mut next = self.clone();
        next.board[mv.from.index()] = None;

        let mut captured = target.is_some();
        if mv.is_en_passant {
            let victim_sq = en_passant_victim(mv, &illegal)?;
            match self.piece_at(victim_sq) {
                Some(victim)
                    if moving.kind == PieceKind::Pawn
                        && target.is_none()
                        && victim.kind == PieceKind::Pawn
                        && victim.color != moving.color =>
                {
                    next.board[victim_sq.index()] = None;
                    captured = true;
                }
                _ => return Err(illegal),
            }
        }

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(moving, mv).ok_or(illegal.clone())?;
            match self.piece_at(rook_from) {
                Some(rook) if rook.kind == PieceKind::Rook && rook.color == moving.color => {
                    if self.is_square_occupied(rook_to) || target.is_some() {
                        return Err(illegal);
                    }
                    next.board[rook_from.index()] = None;
                    next.board[rook_to.index()] = Some(rook.moved());
                }
                _ => return Err(illegal),
            }
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, moving.color).moved(),
            None => moving.moved(),
        };
        next.board[mv.to.index()] = Some(placed);

        if moving.kind == PieceKind::King {
            next.castling_rights.clear_color(moving.color);
        }
        next.castling_rights.clear_rook_corner(mv.from);
        next.castling_rights.clear_rook_corner(mv.to);

        next.en_passant_square =
            if moving.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
                Some(Square::from_index_unchecked(
                    ((mv.from.index() + mv.to.index()) / 2) as u8,
                ))
            } else {
                None
            };

        if moving.kind == PieceKind::Pawn || captured {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }
        if moving.color == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = moving.color.opposite();

        Ok(next)
    }
}

/// Square of the pawn removed by an en-passant capture.
fn en_passant_victim(mv: &Move, illegal: &ChessErrors) -> ChessResult<Square> {
    Square::new(mv.to.file(), mv.from.rank()).map_err(|_| illegal.clone())
}

/// Rook origin and destination for a castling king move.
fn castle_rook_squares(king: Piece, mv: &Move) -> Option<(Square, Square)> {
    let home = king.color.home_rank();
    if king.kind != PieceKind::King || mv.from.rank() != home || mv.to.rank() != home {
        return None;
    }
    match (mv.from.file(), mv.to.file()) {
        (4, 6) => Some((Square::new(7, home).ok()?, Square::new(5, home).ok()?)),
        (4, 2) => Some((Square::new(0, home).ok()?, Square::new(3, home).ok()?)),
        _ => None,
    }
}
