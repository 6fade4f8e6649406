//! Square conversions for algebraic coordinates.
//!
//! Parses human-readable coordinates (e.g., `e4`) into [`Square`] values;
//! the reverse direction is `Square`'s `Display`. Shared by the FEN, long
//! algebraic and UCI components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::parse(format!("invalid algebraic square: {square}")));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::parse(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::parse(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    Square::from_file_rank(file - b'a', rank - b'1')
        .ok_or_else(|| ChessError::parse(format!("invalid algebraic square: {square}")))
}
