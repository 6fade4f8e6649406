//! Authoritative piece placement.
//!
//! The board knows where pieces stand and nothing about the rules. Storage is
//! one bitboard per (color, kind) plus occupancy caches, so a full copy is a
//! fixed-size memcpy.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square.bit();
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
            .map(|kind| Piece::new(color, kind))
    }

    /// Puts `piece` on `square`, replacing whatever stood there. `None` clears it.
    pub fn place(&mut self, square: Square, piece: Option<Piece>) {
        let mask = square.bit();
        if self.occupancy_all & mask != 0 {
            for color_boards in self.pieces.iter_mut() {
                for bb in color_boards.iter_mut() {
                    *bb &= !mask;
                }
            }
            self.occupancy_by_color[0] &= !mask;
            self.occupancy_by_color[1] &= !mask;
            self.occupancy_all &= !mask;
        }

        if let Some(piece) = piece {
            self.pieces[piece.color.index()][piece.kind.index()] |= mask;
            self.occupancy_by_color[piece.color.index()] |= mask;
            self.occupancy_all |= mask;
        }
    }

    /// Moves whatever stands on `from` to `to`; returns the piece it displaced.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.piece_at(from);
        let displaced = self.piece_at(to);
        self.place(from, None);
        self.place(to, moving);
        displaced
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.occupancy_all & square.bit() == 0
    }

    /// First king of `color` in index order; `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        iter_squares(self.pieces(color, PieceKind::King)).next()
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.pieces(color, kind).count_ones()
    }

    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> {
        iter_squares(self.occupancy(color))
    }
}
