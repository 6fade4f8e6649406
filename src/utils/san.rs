//! Short algebraic history tokens.
//!
//! Tokens carry the piece letter (none for pawns), the pawn's origin file on
//! captures, `x` on captures, the destination, and `=<Letter>` on promotion.
//! Castling is `O-O` / `O-O-O`. No disambiguation and no check suffix.

use crate::game_state::chess_types::{CastleSide, PieceKind};
use crate::moves::move_descriptions::ChessMove;

pub fn san_piece_letter(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Pawn => None,
        other => Some(other.lower_char().to_ascii_uppercase()),
    }
}

pub fn move_to_san(chess_move: &ChessMove) -> String {
    if let Some(side) = chess_move.castle_side() {
        return match side {
            CastleSide::Kingside => "O-O".to_owned(),
            CastleSide::Queenside => "O-O-O".to_owned(),
        };
    }

    let mut out = String::with_capacity(8);
    match san_piece_letter(chess_move.moved_piece.kind) {
        Some(letter) => out.push(letter),
        None if chess_move.is_capture() => out.push(chess_move.from.file_char()),
        None => {}
    }
    if chess_move.is_capture() {
        out.push('x');
    }
    out.push_str(&chess_move.to.to_string());
    if let Some(kind) = chess_move.promotion() {
        out.push('=');
        if let Some(letter) = san_piece_letter(kind) {
            out.push(letter);
        }
    }
    out
}
