//! Perft node counting over the legality filter.

use crate::game_state::position::Position;
use crate::move_generation::attack_map::is_king_in_check;
use crate::move_generation::legal_move_filter::{generate_legal_moves, has_any_legal_move, GeneratedMove};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for generated in generate_legal_moves(position) {
        perft_recurse(&generated, depth, 1, &mut total);
    }
    total
}

/// Per-root-move counts, in legal move order.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(Move, PerftCounts)> {
    if depth == 0 {
        return Vec::new();
    }

    generate_legal_moves(position)
        .into_iter()
        .map(|generated| {
            let mut local = PerftCounts::default();
            perft_recurse(&generated, depth, 1, &mut local);
            (generated.mv, local)
        })
        .collect()
}

fn perft_recurse(
    generated: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        let mv = &generated.mv;
        let after = &generated.position_after;
        let mut leaf = PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };

        leaf.captures = mv.is_capture as usize;
        leaf.en_passant = mv.is_en_passant as usize;
        leaf.castles = mv.is_castle as usize;
        leaf.promotions = mv.promotion.is_some() as usize;

        if is_king_in_check(after, after.side_to_move) {
            leaf.checks = 1;
            leaf.checkmates = (!has_any_legal_move(after)) as usize;
        }

        counts.merge(leaf);
        return;
    }

    for child in generate_legal_moves(&generated.position_after) {
        perft_recurse(&child, search_depth, current_depth + 1, counts);
    }
}
