//! FEN-to-GameState parser.
//!
//! Builds a fully populated position from a Forsyth-Edwards Notation string:
//! placement, side to move, castling rights, en-passant target and clocks.
//! Every malformed field is reported as [`ChessError::Parse`].

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let [board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        fields[..]
    else {
        return Err(ChessError::parse(format!(
            "FEN needs 6 fields, got {}",
            fields.len()
        )));
    };

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = parse_counter(halfmove_part)
        .ok_or_else(|| ChessError::parse(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = parse_counter(fullmove_part)
        .filter(|n| *n >= 1)
        .ok_or_else(|| ChessError::parse(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::parse("board layout must contain 8 ranks"));
    }

    for (rank_str, board_rank) in ranks.iter().zip((0u8..8).rev()) {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::parse(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(ChessError::parse(format!("rank '{rank_str}' is wider than 8 files")));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::parse(format!("invalid piece character '{ch}' in board layout"))
            })?;

            let square = Square::from_file_rank(file, board_rank)
                .ok_or_else(|| ChessError::parse(format!("rank '{rank_str}' is wider than 8 files")))?;
            game_state.board.place(square, Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::parse(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::parse(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastleSide::Kingside),
            'Q' => (Color::White, CastleSide::Queenside),
            'k' => (Color::Black, CastleSide::Kingside),
            'q' => (Color::Black, CastleSide::Queenside),
            _ => {
                return Err(ChessError::parse(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        };
        if rights.has(color, side) {
            return Err(ChessError::parse(format!(
                "repeated castling rights character: {ch}"
            )));
        }
        rights.set(color, side, true);
    }

    Ok(rights)
}

/// The target must be the square the opponent's pawn just skipped: rank 6
/// with white to move, rank 3 with black to move, empty, with that pawn
/// standing directly beyond it.
fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)?;
    let pusher = game_state.side_to_move.opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    if square.rank() != expected_rank {
        return Err(ChessError::parse(format!(
            "en-passant square {square} does not fit {} to move",
            game_state.side_to_move
        )));
    }

    let pushed_pawn = square
        .offset(0, pusher.forward())
        .and_then(|pawn_sq| game_state.board.piece_at(pawn_sq));
    if game_state.board.piece_at(square).is_some()
        || pushed_pawn != Some(Piece::new(pusher, PieceKind::Pawn))
    {
        return Err(ChessError::parse(format!(
            "en-passant square {square} has no double-pushed pawn behind it"
        )));
    }
    Ok(Some(square))
}

/// Plain decimal digits only; `str::parse` would also take a leading `+`.
fn parse_counter(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
