//! Long algebraic coordinates (`e2e4`, `e7e8q`).
//!
//! The wire form of a move for UCI and the terminal front-end. A
//! [`LongAlgebraicMove`] only names squares and an optional promotion; it is
//! matched against the legal moves of a position to become a [`ChessMove`].

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongAlgebraicMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl LongAlgebraicMove {
    pub fn parse(token: &str) -> ChessResult<Self> {
        if !token.is_ascii() || (token.len() != 4 && token.len() != 5) {
            return Err(ChessError::parse(format!("invalid long algebraic move: {token}")));
        }

        let from = algebraic_to_square(&token[0..2])?;
        let to = algebraic_to_square(&token[2..4])?;
        let promotion = match token[4..].chars().next() {
            None => None,
            Some(ch) => Some(char_to_promotion(ch)?),
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// True when `chess_move` goes between the same squares with the same
    /// promotion choice.
    pub fn matches(&self, chess_move: &ChessMove) -> bool {
        chess_move.from == self.from
            && chess_move.to == self.to
            && chess_move.promotion() == self.promotion
    }

    /// The legal move of `game_state` this token names.
    pub fn resolve(&self, game_state: &GameState) -> ChessResult<ChessMove> {
        legal_moves(game_state, self.from)
            .into_iter()
            .find(|chess_move| self.matches(chess_move))
            .ok_or(ChessError::InvalidMove {
                from: self.from,
                to: self.to,
            })
    }
}

impl From<&ChessMove> for LongAlgebraicMove {
    fn from(chess_move: &ChessMove) -> Self {
        Self {
            from: chess_move.from,
            to: chess_move.to,
            promotion: chess_move.promotion(),
        }
    }
}

impl fmt::Display for LongAlgebraicMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.lower_char())?;
        }
        Ok(())
    }
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    PieceKind::from_char(ch)
        .filter(|kind| kind.is_promotion_target())
        .ok_or_else(|| ChessError::parse(format!("invalid promotion piece character: {ch}")))
}
