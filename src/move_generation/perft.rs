//! Perft: exhaustive legal-move tree counts used to validate generation.
//!
//! Leaf moves are classified the way the published reference tables are, so
//! a mismatch points at the rule that is wrong.

use std::sync::Arc;
use std::thread;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::move_descriptions::SpecialMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn count_leaf(&mut self, leaf: &GeneratedMove) {
        let chess_move = &leaf.chess_move;
        self.nodes += 1;

        if chess_move.is_capture() {
            self.captures += 1;
        }
        match chess_move.special {
            SpecialMove::EnPassantCapture => self.en_passant += 1,
            SpecialMove::CastleKingside | SpecialMove::CastleQueenside => self.castles += 1,
            SpecialMove::Promotion(_) => self.promotions += 1,
            SpecialMove::None | SpecialMove::DoublePush => {}
        }

        let after = &leaf.game_after_move;
        if is_king_in_check(&after.board, after.side_to_move) {
            self.checks += 1;
            if !has_any_legal_move(after) {
                self.checkmates += 1;
            }
        }
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state) {
        perft_recurse(generator, &mv, depth, 1, &mut total);
    }
    total
}

/// Same counts as [`perft`], one worker thread per root move.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state);
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            perft_recurse(generator_ref.as_ref(), &mv, depth, 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| ChessError::invalid_state("perft worker thread panicked"))?;
        total.merge(local);
    }

    Ok(total)
}

/// Node count per root move, printed by `--divide` style debugging.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    generator
        .generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(generator, &mv, depth, 1, &mut counts);
            (mv.chess_move.to_long_algebraic(), counts.nodes)
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        counts.count_leaf(mv);
        return;
    }

    for child in generator.generate_legal_moves(&mv.game_after_move) {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts);
    }
}
