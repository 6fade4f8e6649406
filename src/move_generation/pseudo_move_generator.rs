//! Per-square pseudo-legal move generation.
//!
//! `pseudo_legal_moves` obeys piece movement rules but ignores self-check.
//! `attack_candidates` is the attack-only variant used by the attack
//! detector: pawns report both forward diagonals whatever stands there, and
//! kings never include castling.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::pseudo_moves_king::generate_king_moves;
use crate::move_generation::pseudo_moves_pawn::generate_pawn_moves;
use crate::move_generation::pseudo_moves_pieces::{generate_piece_moves, piece_reach};
use crate::moves::move_descriptions::ChessMove;
use crate::moves::step_attacks::{king_attacks, pawn_attacks};

pub fn pseudo_legal_moves(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let mut out = Vec::with_capacity(32);
    push_pseudo_legal_moves(game_state, square, &mut out);
    out
}

/// Appends the candidates of the piece on `square`; nothing for an empty square.
pub fn push_pseudo_legal_moves(game_state: &GameState, square: Square, out: &mut Vec<ChessMove>) {
    let Some(piece) = game_state.board.piece_at(square) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(game_state, square, piece, out),
        PieceKind::King => generate_king_moves(game_state, square, piece, out),
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_piece_moves(&game_state.board, square, piece, out)
        }
    }
}

/// Squares the piece on `square` attacks, as a bitboard. Own pieces are
/// excluded.
pub fn attack_candidates(board: &Board, square: Square) -> u64 {
    let Some(piece) = board.piece_at(square) else {
        return 0;
    };

    let reach = match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::King => king_attacks(square),
        kind => piece_reach(board, square, kind),
    };
    reach & !board.occupancy(piece.color)
}
