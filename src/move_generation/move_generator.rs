use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub game_after_move: GameState,
}

/// Whole-position legal move generation, the seam perft and status
/// evaluation are written against.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove>;
}
