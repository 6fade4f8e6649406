//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type returned by game logic, parsers and
//! the engine bridge. Every variant describes a local, recoverable rejection:
//! the operation that produced it leaves all game state untouched.

use thiserror::Error;

use crate::game::status::GameStatus;
use crate::game_state::chess_types::Square;

#[derive(Error, Debug)]
pub enum ChessError {
    /// The `(from, to[, promotion])` request matches no legal move.
    #[error("invalid move: {from} to {to}")]
    InvalidMove { from: Square, to: Square },

    /// A move was requested after checkmate or stalemate.
    #[error("game is over: {0}")]
    GameOver(GameStatus),

    /// Malformed FEN, square, or engine token.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// An operation arrived in a state that cannot accept it (promotion
    /// resolution with nothing pending, second engine request in flight...).
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// The external engine misbehaved or went away.
    #[error("engine bridge: {message}")]
    Engine { message: String },

    #[error("engine bridge I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl ChessError {
    pub fn parse(message: impl Into<String>) -> Self {
        ChessError::Parse {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ChessError::InvalidState {
            message: message.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        ChessError::Engine {
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
