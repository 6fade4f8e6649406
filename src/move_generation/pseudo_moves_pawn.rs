//! Pseudo-legal pawn moves: pushes, double pushes, captures, en passant and
//! promotions.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::{ChessMove, SpecialMove};
use crate::moves::step_attacks::pawn_attacks;

pub fn generate_pawn_moves(game_state: &GameState, from: Square, pawn: Piece, out: &mut Vec<ChessMove>) {
    let board = &game_state.board;
    let side = pawn.color;
    let forward = side.forward();

    if let Some(one_step) = from.offset(0, forward) {
        if board.is_empty_square(one_step) {
            push_pawn_move(from, one_step, pawn, None, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if board.is_empty_square(two_step) {
                        out.push(ChessMove {
                            from,
                            to: two_step,
                            moved_piece: pawn,
                            captured_piece: None,
                            special: SpecialMove::DoublePush,
                        });
                    }
                }
            }
        }
    }

    let enemy_occ = board.occupancy(side.opposite());
    for to in iter_squares(pawn_attacks(side, from)) {
        if enemy_occ & to.bit() != 0 {
            push_pawn_move(from, to, pawn, board.piece_at(to), out);
        } else if game_state.en_passant_square == Some(to) {
            // The victim stands beside us, on the file we land on.
            let victim_square = Square::from_file_rank(to.file(), from.rank());
            let victim = victim_square.and_then(|sq| board.piece_at(sq));
            let expected = Piece::new(side.opposite(), PieceKind::Pawn);
            if victim == Some(expected) {
                out.push(ChessMove {
                    from,
                    to,
                    moved_piece: pawn,
                    captured_piece: victim,
                    special: SpecialMove::EnPassantCapture,
                });
            }
        }
    }
}

/// Single-step push or capture; fans out into one move per promotion kind on
/// the last rank.
fn push_pawn_move(
    from: Square,
    to: Square,
    pawn: Piece,
    captured_piece: Option<Piece>,
    out: &mut Vec<ChessMove>,
) {
    if to.rank() == pawn.color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            out.push(ChessMove {
                from,
                to,
                moved_piece: pawn,
                captured_piece,
                special: SpecialMove::Promotion(kind),
            });
        }
    } else {
        out.push(ChessMove {
            from,
            to,
            moved_piece: pawn,
            captured_piece,
            special: SpecialMove::None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{ChessMove, SpecialMove};

    fn sq(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("test square should parse")
    }

    fn pawn_moves(fen: &str, from: &str) -> Vec<ChessMove> {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        let pawn = state.piece_at(sq(from)).expect("a pawn should stand on the square");
        let mut out = Vec::new();
        generate_pawn_moves(&state, sq(from), pawn, &mut out);
        out
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].special, SpecialMove::None);
        assert_eq!(moves[1].special, SpecialMove::DoublePush);
        assert_eq!(moves[1].to, sq("e4"));
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2");
        assert!(moves.is_empty());

        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2");
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn en_passant_capture_targets_the_skipped_square() {
        let moves = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5");
        let ep = moves
            .iter()
            .find(|mv| mv.special == SpecialMove::EnPassantCapture)
            .expect("en passant should be generated");
        assert_eq!(ep.to, sq("d6"));
        assert_eq!(
            ep.captured_piece,
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_beside_the_mover() {
        let mut state =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        state.board.place(sq("d5"), None);
        let pawn = state.piece_at(sq("e5")).expect("a pawn should stand on e5");
        let mut moves = Vec::new();
        generate_pawn_moves(&state, sq("e5"), pawn, &mut moves);
        assert!(moves
            .iter()
            .all(|mv| mv.special != SpecialMove::EnPassantCapture));
    }

    #[test]
    fn capture_onto_last_rank_fans_out_into_promotions() {
        let moves = pawn_moves("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7");
        // four quiet promotions on a8 plus four capturing promotions on b8
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|mv| mv.is_capture()).count(), 4);
        assert!(moves.iter().all(|mv| mv.promotion().is_some()));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1", "d7");
        let targets: Vec<String> = moves.iter().map(|mv| mv.to.to_string()).collect();
        assert_eq!(targets, vec!["d6", "d5"]);
    }
}
