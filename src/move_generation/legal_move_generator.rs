//! Legality filtering.
//!
//! Pseudo-legal candidates are applied to a copy of the position and dropped
//! when the mover's own king is attacked afterwards.

use crate::game_state::chess_types::Square;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::move_generation::pseudo_move_generator::{pseudo_legal_moves, push_pseudo_legal_moves};
use crate::moves::move_descriptions::ChessMove;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<GeneratedMove> {
        let side = game_state.side_to_move;
        let mut pseudo = Vec::<ChessMove>::with_capacity(64);
        for square in game_state.board.squares_of(side) {
            push_pseudo_legal_moves(game_state, square, &mut pseudo);
        }

        pseudo
            .into_iter()
            .filter_map(|chess_move| {
                let next = apply_move(game_state, &chess_move);
                (!is_king_in_check(&next.board, side)).then_some(GeneratedMove {
                    chess_move,
                    game_after_move: next,
                })
            })
            .collect()
    }
}

/// Legal moves of the piece on `square`. Empty when the square is empty or
/// holds a piece of the side not to move.
pub fn legal_moves(game_state: &GameState, square: Square) -> Vec<ChessMove> {
    let side = game_state.side_to_move;
    match game_state.board.piece_at(square) {
        Some(piece) if piece.color == side => {}
        _ => return Vec::new(),
    }

    pseudo_legal_moves(game_state, square)
        .into_iter()
        .filter(|chess_move| leaves_king_safe(game_state, chess_move))
        .collect()
}

/// Every legal move of the side to move, in square order.
pub fn all_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    LegalMoveGenerator
        .generate_legal_moves(game_state)
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect()
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(game_state: &GameState) -> bool {
    game_state
        .board
        .squares_of(game_state.side_to_move)
        .any(|square| {
            pseudo_legal_moves(game_state, square)
                .iter()
                .any(|chess_move| leaves_king_safe(game_state, chess_move))
        })
}

#[inline]
fn leaves_king_safe(game_state: &GameState, chess_move: &ChessMove) -> bool {
    let next = apply_move(game_state, chess_move);
    !is_king_in_check(&next.board, chess_move.moved_piece.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::SpecialMove;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn start_position_has_twenty_legal_moves() {
        let game = GameState::new_game();
        assert_eq!(all_legal_moves(&game).len(), 20);
        assert!(has_any_legal_move(&game));
    }

    #[test]
    fn opponent_and_empty_squares_yield_nothing() {
        let game = GameState::new_game();
        assert!(legal_moves(&game, sq("e7")).is_empty());
        assert!(legal_moves(&game, sq("e4")).is_empty());
        assert_eq!(legal_moves(&game, sq("e2")).len(), 2);
    }

    #[test]
    fn pinned_piece_may_only_move_along_the_pin() {
        // bishop on e2 pinned by the rook on e8
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(legal_moves(&game, sq("e2")).is_empty());

        // rook on e2 pinned by the rook on e8 may slide along the file
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").expect("FEN should parse");
        let targets: Vec<String> = legal_moves(&game, sq("e2"))
            .iter()
            .map(|mv| mv.to.to_string())
            .collect();
        assert_eq!(targets, vec!["e3", "e4", "e5", "e6", "e7", "e8"]);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let game = GameState::from_fen("3rk3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let targets: Vec<String> = legal_moves(&game, sq("e1"))
            .iter()
            .map(|mv| mv.to.to_string())
            .collect();
        assert_eq!(targets, vec!["f1", "e2", "f2"]);
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        // capturing d5 would open the fifth rank to the rook on h5
        let game = GameState::from_fen("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1").expect("FEN should parse");
        let moves = legal_moves(&game, sq("e5"));
        assert!(moves
            .iter()
            .all(|mv| mv.special != SpecialMove::EnPassantCapture));
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn checkmated_side_has_no_moves() {
        let game = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("FEN should parse");
        assert!(!has_any_legal_move(&game));
        assert!(all_legal_moves(&game).is_empty());
    }
}
