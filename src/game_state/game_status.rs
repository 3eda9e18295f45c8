//! Position classification after a move.
//!
//! Evaluation order: check detection, then the mobility test (checkmate or
//! stalemate), then the fifty-move clock, then insufficient material.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::FIFTY_MOVE_RULE_PLIES;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::attack_map::is_king_in_check;
use crate::move_generation::legal_move_filter::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
    DrawByFiftyMoveRule,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    /// Statuses after which no further move is accepted.
    ///
    /// The fifty-move draw is only reported; whether it ends the game is the
    /// session's decision.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::DrawByInsufficientMaterial
        )
    }

    /// The side that delivered mate, if any.
    pub const fn winner(self, side_to_move: Color) -> Option<Color> {
        match self {
            GameStatus::Checkmate => Some(side_to_move.opposite()),
            _ => None,
        }
    }

    /// One-line message for a status bar.
    pub fn status_text(self, side_to_move: Color) -> String {
        match self {
            GameStatus::Normal => format!("{side_to_move} to move."),
            GameStatus::Check => format!("Check! {side_to_move} has to defend."),
            GameStatus::Checkmate => format!("Check mate! {} wins.", side_to_move.opposite()),
            GameStatus::Stalemate => format!("Stalemate! {side_to_move} can't move."),
            GameStatus::DrawByFiftyMoveRule => "50-move-rule applies".to_owned(),
            GameStatus::DrawByInsufficientMaterial => {
                "Draw! Neither side can force mate.".to_owned()
            }
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::DrawByFiftyMoveRule => "draw by fifty-move rule",
            GameStatus::DrawByInsufficientMaterial => "draw by insufficient material",
        };
        f.write_str(label)
    }
}

/// Classify `position` with the standard 100-ply fifty-move limit.
pub fn evaluate(position: &Position) -> GameStatus {
    evaluate_with_limit(position, FIFTY_MOVE_RULE_PLIES)
}

pub fn evaluate_with_limit(position: &Position, fifty_move_limit: u16) -> GameStatus {
    let in_check = is_king_in_check(position, position.side_to_move);

    if !has_any_legal_move(position) {
        return if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }

    if position.halfmove_clock >= fifty_move_limit {
        return GameStatus::DrawByFiftyMoveRule;
    }

    if has_insufficient_material(position) {
        return GameStatus::DrawByInsufficientMaterial;
    }

    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Normal
    }
}

/// Neither side can force mate: bare kings, a single minor piece, or only
/// bishops that all stand on one square color.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut minors = 0usize;
    let mut knights = 0usize;
    let mut light_bishops = 0usize;
    let mut dark_bishops = 0usize;

    for (square, piece) in position.all_pieces() {
        if piece.kind == PieceKind::King {
            continue;
        }
        if !piece.kind.is_minor() {
            return false;
        }

        minors += 1;
        if piece.kind == PieceKind::Knight {
            knights += 1;
        } else if square.is_light() {
            light_bishops += 1;
        } else {
            dark_bishops += 1;
        }
    }

    if minors <= 1 {
        return true;
    }

    // Same-colored bishops can never cover the other half of the board.
    knights == 0 && (light_bishops == 0 || dark_bishops == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(fen: &str) -> GameStatus {
        evaluate(&Position::from_fen(fen).expect("test FEN should parse"))
    }

    #[test]
    fn opening_position_is_normal() {
        assert_eq!(evaluate(&Position::new_game()), GameStatus::Normal);
    }

    #[test]
    fn smothered_king_on_h1_is_mated() {
        let fen = "k7/8/8/8/8/8/5nPP/6RK w - - 0 1";
        let position = Position::from_fen(fen).expect("fen");
        assert!(
            crate::move_generation::legal_move_filter::all_legal_moves(&position).is_empty()
        );
        assert_eq!(evaluate(&position), GameStatus::Checkmate);
        assert_eq!(GameStatus::Checkmate.winner(Color::White), Some(Color::Black));
        assert_eq!(
            GameStatus::Checkmate.status_text(Color::White),
            "Check mate! Black wins."
        );
    }

    #[test]
    fn cornered_king_without_moves_is_stalemated() {
        assert_eq!(status_of("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1"), GameStatus::Stalemate);
    }

    #[test]
    fn check_is_reported_before_draw_rules_and_with_moves() {
        assert_eq!(status_of("4k3/8/8/8/8/8/4r3/R3K3 w - - 0 1"), GameStatus::Check);
        assert_eq!(
            GameStatus::Check.status_text(Color::White),
            "Check! White has to defend."
        );
    }

    #[test]
    fn fifty_move_draw_after_hundred_quiet_plies() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("fen");
        let shuffle = ["a1a2", "e8d8", "a2a1", "d8e8"];
        for ply in 0..100 {
            assert_ne!(evaluate(&position), GameStatus::DrawByFiftyMoveRule, "ply {ply}");
            let text = shuffle[ply % shuffle.len()];
            let from = text[0..2].parse().expect("from");
            let to = text[2..4].parse().expect("to");
            let mv = crate::move_generation::legal_move_filter::legal_moves(&position, from)
                .into_iter()
                .find(|mv| mv.to == to)
                .expect("shuffle move should be legal");
            position = position.apply(&mv).expect("apply");
        }
        assert_eq!(position.halfmove_clock, 100);
        assert_eq!(evaluate(&position), GameStatus::DrawByFiftyMoveRule);
        assert!(!GameStatus::DrawByFiftyMoveRule.is_terminal());
        assert_eq!(
            evaluate_with_limit(&position, 120),
            GameStatus::Normal
        );
    }

    #[test]
    fn mate_outranks_the_fifty_move_clock() {
        assert_eq!(
            status_of("k7/8/8/8/8/8/5nPP/6RK w - - 120 80"),
            GameStatus::Checkmate
        );
    }

    #[test]
    fn insufficient_material_cases() {
        let draw = |fen: &str| has_insufficient_material(&Position::from_fen(fen).expect("fen"));
        assert!(draw("4k3/8/8/8/8/8/8/4K3 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"));
        assert!(draw("4k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        // f1 and c8 are both light squares.
        assert!(draw("2b1k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        assert!(!draw("1b2k3/8/8/8/8/8/8/4KB2 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert!(!draw("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));

        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"),
            GameStatus::DrawByInsufficientMaterial
        );
        assert!(GameStatus::DrawByInsufficientMaterial.is_terminal());
    }

    #[test]
    fn kingless_two_figure_setup_is_evaluated() {
        // White king against a lone black knight: in check, can move, no mating material.
        let position = Position::from_fen("8/8/8/8/8/5n2/8/4K3 w - - 0 1").expect("fen");
        assert_eq!(evaluate(&position), GameStatus::DrawByInsufficientMaterial);
    }
}
