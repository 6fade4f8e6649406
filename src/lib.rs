//! Crate root module declarations for the chessies rules engine.
//!
//! Exposes the position model, move generation and legality filtering, the
//! game state machine, notation helpers and the UCI engine bridge so the
//! terminal binary, tests and benches can import stable module paths.

pub mod chess_errors;
pub mod config;
pub mod terminal;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod slider_attacks;
    pub mod step_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
    pub mod pseudo_move_generator;
    pub mod pseudo_moves_king;
    pub mod pseudo_moves_pawn;
    pub mod pseudo_moves_pieces;
}

pub mod game {
    pub mod game_machine;
    pub mod promotion;
    pub mod status;
}

pub mod uci {
    pub mod engine_bridge;
    pub mod uci_protocol;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
    pub mod san;
}
