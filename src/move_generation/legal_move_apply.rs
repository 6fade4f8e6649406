//! Move application on a copy of the position.
//!
//! `apply_move` never touches its input: legality filtering calls it once per
//! candidate and throws the result away, and the game machine keeps the
//! result as its new position. Nothing has to be restored afterwards.

use crate::game_state::chess_rules::{castle_geometry, castle_side_for_rook_home};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{ChessMove, SpecialMove};

pub fn apply_move(game_state: &GameState, chess_move: &ChessMove) -> GameState {
    let mut next = game_state.clone();
    let mover = chess_move.moved_piece;
    let color = mover.color;

    // Remove the victim first; for en passant it is not on the destination.
    if let Some(capture_sq) = chess_move.capture_square() {
        next.board.place(capture_sq, None);
    }

    next.board.place(chess_move.from, None);
    let landed = match chess_move.special {
        SpecialMove::Promotion(kind) => Piece::new(color, kind),
        _ => mover,
    };
    next.board.place(chess_move.to, Some(landed));

    if let Some(side) = chess_move.castle_side() {
        let geometry = castle_geometry(side);
        let rank = color.home_rank();
        let rook_from = Square::from_file_rank(geometry.rook_from_file, rank);
        let rook_to = Square::from_file_rank(geometry.rook_to_file, rank);
        if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
            next.board.relocate(rook_from, rook_to);
        }
    }

    update_castling_rights(&mut next, chess_move);

    next.en_passant_square = match chess_move.special {
        SpecialMove::DoublePush => chess_move.from.offset(0, color.forward()),
        _ => None,
    };

    if mover.kind == PieceKind::Pawn || chess_move.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if color == Color::Black {
        next.fullmove_number += 1;
    }

    next.side_to_move = color.opposite();
    next
}

fn update_castling_rights(game_state: &mut GameState, chess_move: &ChessMove) {
    let mover = chess_move.moved_piece;
    let rights = &mut game_state.castling_rights;

    if mover.kind == PieceKind::King {
        rights.revoke_all(mover.color);
    }

    // A rook leaving its corner, or anything landing on a corner (capturing
    // the rook that stood there), ends that side's right.
    for square in [chess_move.from, chess_move.to] {
        if let Some((color, side)) = castle_side_for_rook_home(square.file(), square.rank()) {
            rights.revoke(color, side);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{ChessMove, SpecialMove};

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    fn mv(state: &GameState, from: &str, to: &str, special: SpecialMove) -> ChessMove {
        let moved_piece = state.piece_at(sq(from)).expect("a piece should stand on from");
        let captured_piece = match special {
            SpecialMove::EnPassantCapture => Some(Piece::new(moved_piece.color.opposite(), PieceKind::Pawn)),
            _ => state.piece_at(sq(to)),
        };
        ChessMove {
            from: sq(from),
            to: sq(to),
            moved_piece,
            captured_piece,
            special,
        }
    }

    #[test]
    fn double_push_sets_en_passant_and_clocks() {
        let state = GameState::new_game();
        let next = apply_move(&state, &mv(&state, "e2", "e4", SpecialMove::DoublePush));

        assert_eq!(next.en_passant_square, Some(sq("e3")));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        // the input is untouched
        assert_eq!(state, GameState::new_game());
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_mover() {
        let state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let next = apply_move(&state, &mv(&state, "e5", "d6", SpecialMove::EnPassantCapture));

        assert_eq!(next.piece_at(sq("d5")), None);
        assert_eq!(
            next.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(next.en_passant_square, None);
        assert_eq!(next.get_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn castling_moves_the_rook_and_revokes_rights() {
        let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10").expect("FEN should parse");
        let next = apply_move(&state, &mv(&state, "e8", "c8", SpecialMove::CastleQueenside));

        assert_eq!(next.get_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11");
    }

    #[test]
    fn capturing_a_corner_rook_revokes_the_victims_right() {
        let state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let next = apply_move(&state, &mv(&state, "a1", "a8", SpecialMove::None));

        assert!(!next.castling_rights.white_queenside);
        assert!(!next.castling_rights.black_queenside);
        assert!(next.castling_rights.white_kingside);
        assert!(next.castling_rights.black_kingside);
        assert_eq!(next.halfmove_clock, 0);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let state = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let next = apply_move(
            &state,
            &mv(&state, "a7", "a8", SpecialMove::Promotion(PieceKind::Knight)),
        );
        assert_eq!(
            next.piece_at(sq("a8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(next.board.count(Color::White, PieceKind::Pawn), 0);
    }

    #[test]
    fn quiet_piece_move_ticks_the_halfmove_clock() {
        let state = GameState::new_game();
        let next = apply_move(&state, &mv(&state, "g1", "f3", SpecialMove::None));
        assert_eq!(next.halfmove_clock, 1);
        assert!(next.castling_rights.white_kingside);
    }

    #[test]
    fn clocks_keep_counting_past_sixteen_bits() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 65535 65535").expect("FEN should parse");
        let next = apply_move(&state, &mv(&state, "e8", "d8", SpecialMove::None));
        assert_eq!(next.halfmove_clock, 65_536);
        assert_eq!(next.fullmove_number, 65_536);
        assert_eq!(next.get_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 65536 65536");
    }
}
