//! Move description type shared by generation, application and notation.

use std::fmt;

use crate::game_state::chess_types::{CastleSide, Piece, PieceKind, Square};
use crate::utils::long_algebraic::LongAlgebraicMove;

/// The non-ordinary part of a move, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    None,
    DoublePush,
    EnPassantCapture,
    CastleKingside,
    CastleQueenside,
    Promotion(PieceKind),
}

/// A fully resolved move: enough to apply it and to write its notation without
/// looking at the board again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub special: SpecialMove,
}

impl ChessMove {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.special {
            SpecialMove::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub fn castle_side(&self) -> Option<CastleSide> {
        match self.special {
            SpecialMove::CastleKingside => Some(CastleSide::Kingside),
            SpecialMove::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    /// Square holding the piece this move removes. Differs from `to` only for
    /// en passant, where the victim sits beside `from` on the same rank.
    pub fn capture_square(&self) -> Option<Square> {
        self.captured_piece?;
        match self.special {
            SpecialMove::EnPassantCapture => Square::from_file_rank(self.to.file(), self.from.rank()),
            _ => Some(self.to),
        }
    }

    /// UCI-style long algebraic form, e.g. `e2e4` or `e7e8q`.
    pub fn to_long_algebraic(&self) -> String {
        LongAlgebraicMove::from(self).to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}
