//! Promotion suspension.
//!
//! A move onto the last rank without a chosen kind is parked as a
//! [`PendingPromotion`]. The token is handed to the caller and must come back
//! through `ChessGame::resolve_promotion` exactly once.

use crate::game_state::chess_types::{Color, PieceKind, Square, PROMOTION_KINDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingPromotion {
    pub(crate) id: u64,
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

impl PendingPromotion {
    /// Kinds the caller may resolve with.
    #[inline]
    pub fn allowed(&self) -> &'static [PieceKind] {
        &PROMOTION_KINDS
    }
}

/// Synchronous promotion collaborator: asked once per promoting move, must
/// answer with one of `allowed`.
pub trait PromotionChooser {
    fn choose(&mut self, color: Color, allowed: &[PieceKind]) -> PieceKind;
}

/// Always answers with the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub PieceKind);

impl Default for FixedPromotion {
    fn default() -> Self {
        FixedPromotion(PieceKind::Queen)
    }
}

impl PromotionChooser for FixedPromotion {
    fn choose(&mut self, _color: Color, _allowed: &[PieceKind]) -> PieceKind {
        self.0
    }
}

impl<F> PromotionChooser for F
where
    F: FnMut(Color, &[PieceKind]) -> PieceKind,
{
    fn choose(&mut self, color: Color, allowed: &[PieceKind]) -> PieceKind {
        self(color, allowed)
    }
}
