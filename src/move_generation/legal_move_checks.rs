//! Attack detection.
//!
//! `is_square_attacked` asks every piece of the attacking color for its
//! attack-only candidates. That is a scan over at most sixteen pieces per
//! query and the hot path of legality filtering; a reverse lookup from the
//! target square would be the first thing to change if this ever backs a
//! search.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_move_generator::attack_candidates;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.king_square(color)
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let target = square.bit();
    board
        .squares_of(attacker_color)
        .any(|from| attack_candidates(board, from) & target != 0)
}

/// `false` when `color` has no king on the board.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn start_position_attacks() {
        let state = GameState::new_game();
        let board = &state.board;
        assert!(is_square_attacked(board, sq("f3"), Color::White));
        assert!(is_square_attacked(board, sq("d6"), Color::Black));
        assert!(!is_square_attacked(board, sq("e4"), Color::White));
        assert!(!is_king_in_check(board, Color::White));
    }

    #[test]
    fn slider_attack_is_blocked_by_any_piece() {
        let state = GameState::from_fen("4k3/8/8/8/4r3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&state.board, sq("e2"), Color::Black));
        assert!(!is_king_in_check(&state.board, Color::White));
    }

    #[test]
    fn double_check_is_check() {
        let state = GameState::from_fen("4k3/8/8/8/8/3n4/8/4K2r w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&state.board, Color::White));
        // each attacker alone still covers e1
        let mut rook_only = state.board.clone();
        rook_only.place(sq("d3"), None);
        assert!(is_square_attacked(&rook_only, sq("e1"), Color::Black));
        let mut knight_only = state.board.clone();
        knight_only.place(sq("h1"), None);
        assert!(is_square_attacked(&knight_only, sq("e1"), Color::Black));
    }

    #[test]
    fn missing_king_is_never_in_check() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/7r w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(&state.board, Color::White));
        assert_eq!(king_square(&state.board, Color::White), None);
    }
}
