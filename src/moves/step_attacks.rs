//! Precomputed attack sets for pieces that step instead of slide.
//!
//! Knights and kings use fixed offset tables; pawns capture one step
//! diagonally forward. All tables are built at compile time.

use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_OFFSETS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_OFFSETS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = build_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_table(&WHITE_PAWN_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_table(&BLACK_PAWN_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index() as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index() as usize]
}

/// Diagonal-forward squares a pawn of `color` on `square` attacks, whether or
/// not anything stands there.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index() as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square.index() as usize],
    }
}

const fn build_table(offsets: &[(i8, i8)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r as usize * 8 + f as usize);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(index: u8) -> Square {
        Square::from_index(index).expect("index should be on the board")
    }

    #[test]
    fn knight_in_centre_has_eight_targets() {
        assert_eq!(knight_attacks(sq(27)).count_ones(), 8);
        assert_eq!(knight_attacks(sq(0)).count_ones(), 2);
    }

    #[test]
    fn king_in_corner_has_three_targets() {
        assert_eq!(king_attacks(sq(0)).count_ones(), 3);
        assert_eq!(king_attacks(sq(36)).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        // e2 -> d3, f3
        assert_eq!(pawn_attacks(Color::White, sq(12)), (1u64 << 19) | (1u64 << 21));
        // e7 -> d6, f6
        assert_eq!(pawn_attacks(Color::Black, sq(52)), (1u64 << 43) | (1u64 << 45));
        // a-file pawn only has one diagonal
        assert_eq!(pawn_attacks(Color::White, sq(8)), 1u64 << 17);
        // no squares beyond the last rank
        assert_eq!(pawn_attacks(Color::White, sq(60)), 0);
    }
}
