//! Pseudo-legal king moves, castling included.
//!
//! Castling safety is checked here through the attack detector, which only
//! ever asks for attack-only candidates, so there is no recursion back into
//! castling generation.

use crate::game_state::chess_rules::{castle_geometry, KING_HOME_FILE};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::pseudo_moves_pieces::push_target_moves;
use crate::moves::move_descriptions::{ChessMove, SpecialMove};
use crate::moves::step_attacks::king_attacks;

pub fn generate_king_moves(game_state: &GameState, from: Square, king: Piece, out: &mut Vec<ChessMove>) {
    let board = &game_state.board;
    let targets = king_attacks(from) & !board.occupancy(king.color);
    push_target_moves(board, from, king, targets, out);

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if let Some(castle) = castling_move(game_state, from, king, side) {
            out.push(castle);
        }
    }
}

fn castling_move(game_state: &GameState, from: Square, king: Piece, side: CastleSide) -> Option<ChessMove> {
    let color = king.color;
    if !game_state.castling_rights.has(color, side) {
        return None;
    }

    let rank = color.home_rank();
    if from != Square::from_file_rank(KING_HOME_FILE, rank)? {
        return None;
    }

    let board = &game_state.board;
    let geometry = castle_geometry(side);
    let rook_home = Square::from_file_rank(geometry.rook_from_file, rank)?;
    if board.piece_at(rook_home) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }

    for &file in geometry.empty_files {
        if !board.is_empty_square(Square::from_file_rank(file, rank)?) {
            return None;
        }
    }

    let enemy = color.opposite();
    for &file in geometry.safe_files {
        if is_square_attacked(board, Square::from_file_rank(file, rank)?, enemy) {
            return None;
        }
    }

    Some(ChessMove {
        from,
        to: Square::from_file_rank(geometry.king_to_file, rank)?,
        moved_piece: king,
        captured_piece: None,
        special: match side {
            CastleSide::Kingside => SpecialMove::CastleKingside,
            CastleSide::Queenside => SpecialMove::CastleQueenside,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{ChessMove, SpecialMove};

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    fn king_moves(fen: &str, from: &str) -> Vec<ChessMove> {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        let king = state.piece_at(sq(from)).expect("a king should stand on the square");
        let mut out = Vec::new();
        generate_king_moves(&state, sq(from), king, &mut out);
        out
    }

    fn castles(moves: &[ChessMove]) -> Vec<SpecialMove> {
        moves
            .iter()
            .filter(|mv| mv.castle_side().is_some())
            .map(|mv| mv.special)
            .collect()
    }

    #[test]
    fn both_castles_available_on_an_open_back_rank() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1");
        assert_eq!(
            castles(&moves),
            vec![SpecialMove::CastleKingside, SpecialMove::CastleQueenside]
        );
        let kingside = moves
            .iter()
            .find(|mv| mv.special == SpecialMove::CastleKingside)
            .expect("kingside castle should exist");
        assert_eq!(kingside.to, sq("g1"));
    }

    #[test]
    fn no_castling_without_the_right() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1", "e1");
        assert_eq!(castles(&moves), vec![SpecialMove::CastleQueenside]);
    }

    #[test]
    fn no_castling_out_of_or_through_check() {
        // rook on e8 checks the king
        let moves = king_moves("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        assert!(castles(&moves).is_empty());

        // rook on f8 covers f1, queenside still fine
        let moves = king_moves("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1", "e1");
        assert_eq!(castles(&moves), vec![SpecialMove::CastleQueenside]);
    }

    #[test]
    fn b_file_only_needs_to_be_empty_not_safe() {
        // rook on b8 attacks b1, which the king never crosses
        let moves = king_moves("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1", "e1");
        assert_eq!(castles(&moves), vec![SpecialMove::CastleQueenside]);
    }

    #[test]
    fn blocked_transit_square_forbids_castling() {
        let moves = king_moves("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1", "e1");
        assert!(castles(&moves).is_empty());
    }
}
