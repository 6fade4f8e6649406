//! Ray walks for bishops, rooks and queens.
//!
//! Each ray runs until the board edge or the first occupied square; that
//! blocker is included in the result so callers can decide whether it is a
//! capture (enemy) or must be dropped (own piece).

use crate::game_state::chess_types::Square;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    walk_rays(square, &BISHOP_DIRECTIONS, occupancy)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    walk_rays(square, &ROOK_DIRECTIONS, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn walk_rays(square: Square, directions: &[(i8, i8)], occupancy: u64) -> u64 {
    let mut attacks = 0u64;

    for &(d_file, d_rank) in directions {
        let mut cursor = square.offset(d_file, d_rank);
        while let Some(target) = cursor {
            attacks |= target.bit();
            if occupancy & target.bit() != 0 {
                break;
            }
            cursor = target.offset(d_file, d_rank);
        }
    }

    attacks
}
