//! Crate root module declarations for the Plum rules core.
//!
//! The crate implements standard chess rules without any rendering or file
//! access: positions, move generation, attack maps, legality filtering, game
//! status evaluation, record serialization and a session type that ties them
//! together for a UI or console front end.

pub mod chess_errors;
pub mod config;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_status;
    pub mod position;
    pub mod undo_state;
    pub mod zobrist;
}

pub mod moves {
    pub mod chess_move;
    pub mod leaper_attacks;
    pub mod pawn_attacks;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod legal_move_filter;
    pub mod perft;
    pub mod pseudo_legal_moves;
}

pub mod serialization {
    pub mod codec_registry;
    pub mod fen_codec;
    pub mod json_codec;
    pub mod record;
    pub mod serializer;
}

pub mod session {
    pub mod game_session;
}

pub mod utils {
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
