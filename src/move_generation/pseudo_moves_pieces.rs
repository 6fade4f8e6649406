//! Pseudo-legal moves for knights, bishops, rooks and queens.
//!
//! These pieces have no special moves: every target square that is empty or
//! holds an enemy piece becomes one candidate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{ChessMove, SpecialMove};
use crate::moves::slider_attacks::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::step_attacks::knight_attacks;

/// Raw reach of a non-pawn, non-king piece, blockers included.
pub fn piece_reach(board: &Board, from: Square, kind: PieceKind) -> u64 {
    let occupied = board.occupied();
    match kind {
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupied),
        PieceKind::Rook => rook_attacks(from, occupied),
        PieceKind::Queen => queen_attacks(from, occupied),
        PieceKind::Pawn | PieceKind::King => 0,
    }
}

pub fn generate_piece_moves(board: &Board, from: Square, piece: Piece, out: &mut Vec<ChessMove>) {
    let targets = piece_reach(board, from, piece.kind) & !board.occupancy(piece.color);
    push_target_moves(board, from, piece, targets, out);
}

/// One plain (non-special) move per target square; captures are read off the
/// board.
pub(crate) fn push_target_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    targets: u64,
    out: &mut Vec<ChessMove>,
) {
    for to in iter_squares(targets) {
        out.push(ChessMove {
            from,
            to,
            moved_piece: piece,
            captured_piece: board.piece_at(to),
            special: SpecialMove::None,
        });
    }
}
