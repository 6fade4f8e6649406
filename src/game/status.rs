//! Game status evaluation.

use std::fmt;

use tracing::error;

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The named side is in check but has a legal reply.
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Status of `game_state` from the point of view of the side to move.
pub fn evaluate_status(game_state: &GameState) -> GameStatus {
    let side = game_state.side_to_move;

    if king_square(&game_state.board, side).is_none() {
        // Positions are validated on entry, so this only fires on a rules bug.
        error!(%side, fen = %game_state.get_fen(), "side to move has no king");
        return GameStatus::Checkmate {
            winner: side.opposite(),
        };
    }

    let in_check = is_king_in_check(&game_state.board, side);
    match (in_check, has_any_legal_move(game_state)) {
        (true, true) => GameStatus::Check(side),
        (true, false) => GameStatus::Checkmate {
            winner: side.opposite(),
        },
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}
