//! Squares attacked by each side.
//!
//! An attack map is the union of the capture-style reach of every piece of a
//! color. Squares held by the attacker's own pieces are included, so a king
//! can never step onto a defended piece.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::game_state::chess_types::{Color, Square, SquareSet};
use crate::game_state::position::Position;
use crate::move_generation::pseudo_legal_moves::attacks_with_occupancy;

/// Every square `color` attacks in `position`.
pub fn attacked_squares(position: &Position, color: Color) -> SquareSet {
    let occupancy = position.occupancy_all();
    position
        .pieces(color)
        .fold(SquareSet::EMPTY, |acc, (square, piece)| {
            SquareSet(acc.0 | attacks_with_occupancy(square, piece, occupancy).0)
        })
}

/// Early-exit membership test for a single square.
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let occupancy = position.occupancy_all();
    position
        .pieces(attacker)
        .any(|(from, piece)| attacks_with_occupancy(from, piece, occupancy).contains(square))
}

/// A side without a king can never be in check.
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    position
        .king_square(color)
        .is_some_and(|king_sq| is_square_attacked(position, king_sq, color.opposite()))
}

/// Attack sets for both colors of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackMap {
    by_color: [SquareSet; 2],
}

impl AttackMap {
    pub fn compute(position: &Position) -> Self {
        Self {
            by_color: [
                attacked_squares(position, Color::White),
                attacked_squares(position, Color::Black),
            ],
        }
    }

    #[inline]
    pub fn attacked_by(&self, color: Color) -> SquareSet {
        self.by_color[color.index()]
    }

    #[inline]
    pub fn is_attacked(&self, square: Square, attacker: Color) -> bool {
        self.by_color[attacker.index()].contains(square)
    }
}

/// Bounded FIFO cache of attack maps keyed by Zobrist hash.
///
/// Storage grows on demand; `capacity` is only the eviction bound.
///
/// The position itself is stored next to each map so a hash collision is
/// treated as a miss instead of returning the wrong squares.
#[derive(Debug)]
pub struct AttackMapCache {
    capacity: usize,
    entries: HashMap<u64, (Position, AttackMap)>,
    insertion_order: VecDeque<u64>,
    hits: u64,
    misses: u64,
}

impl AttackMapCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_compute(&mut self, position: &Position) -> AttackMap {
        let key = position.zobrist_key();
        if let Some((cached_position, map)) = self.entries.get(&key) {
            if cached_position == position {
                self.hits += 1;
                return *map;
            }
        }

        self.misses += 1;
        let map = AttackMap::compute(position);
        if !self.entries.contains_key(&key) {
            if self.entries.len() >= self.capacity {
                if let Some(oldest) = self.insertion_order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
            self.insertion_order.push_back(key);
        }
        self.entries.insert(key, (position.clone(), map));
        trace!(key, entries = self.entries.len(), "attack map cached");
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
