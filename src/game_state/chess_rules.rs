//! Canonical chess-rule constants.
//!
//! Starting placement plus the fixed castling geometry (home squares, transit
//! squares and rook hops) used by move generation and move application.

use crate::game_state::chess_types::{CastleSide, Color};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_HOME_FILE: u8 = 4;

/// Fixed files involved in one castling move, all on the mover's home rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleGeometry {
    pub king_to_file: u8,
    pub rook_from_file: u8,
    pub rook_to_file: u8,
    /// Files that must be empty between king and rook.
    pub empty_files: &'static [u8],
    /// Files the king stands on, crosses, or lands on; none may be attacked.
    pub safe_files: &'static [u8],
}

static KINGSIDE: CastleGeometry = CastleGeometry {
    king_to_file: 6,
    rook_from_file: 7,
    rook_to_file: 5,
    empty_files: &[5, 6],
    safe_files: &[4, 5, 6],
};

static QUEENSIDE: CastleGeometry = CastleGeometry {
    king_to_file: 2,
    rook_from_file: 0,
    rook_to_file: 3,
    empty_files: &[1, 2, 3],
    safe_files: &[4, 3, 2],
};

#[inline]
pub fn castle_geometry(side: CastleSide) -> &'static CastleGeometry {
    match side {
        CastleSide::Kingside => &KINGSIDE,
        CastleSide::Queenside => &QUEENSIDE,
    }
}

/// Which castling right a rook standing on `(file, rank)` guards, if any.
pub fn castle_side_for_rook_home(file: u8, rank: u8) -> Option<(Color, CastleSide)> {
    let color = match rank {
        0 => Color::White,
        7 => Color::Black,
        _ => return None,
    };
    match file {
        0 => Some((color, CastleSide::Queenside)),
        7 => Some((color, CastleSide::Kingside)),
        _ => None,
    }
}
