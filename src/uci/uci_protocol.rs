//! UCI wire lines exchanged with an external engine.
//!
//! Outbound commands render with `Display`; inbound lines are classified by
//! [`parse_engine_line`]. Only `bestmove` carries data the game needs, the
//! rest is surfaced so the bridge can log it.

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};
use crate::utils::long_algebraic::LongAlgebraicMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    SetSkillLevel(u8),
    PositionFen(String),
    GoMovetime(u64),
    Stop,
    Quit,
}

impl fmt::Display for UciCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciCommand::Uci => write!(f, "uci"),
            UciCommand::IsReady => write!(f, "isready"),
            UciCommand::UciNewGame => write!(f, "ucinewgame"),
            UciCommand::SetSkillLevel(level) => {
                write!(f, "setoption name Skill Level value {level}")
            }
            UciCommand::PositionFen(fen) => write!(f, "position fen {fen}"),
            UciCommand::GoMovetime(ms) => write!(f, "go movetime {ms}"),
            UciCommand::Stop => write!(f, "stop"),
            UciCommand::Quit => write!(f, "quit"),
        }
    }
}

/// An engine's chosen move, with the reply it expects if it sent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub best: LongAlgebraicMove,
    pub ponder: Option<LongAlgebraicMove>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineLine {
    BestMove(BestMove),
    /// `bestmove (none)` or `bestmove 0000`: the engine has no move.
    NoMove,
    UciOk,
    ReadyOk,
    Id(String),
    Info(String),
    Other(String),
}

pub fn parse_engine_line(line: &str) -> ChessResult<EngineLine> {
    let trimmed = line.trim();
    let mut parts = trimmed.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Ok(EngineLine::Other(String::new()));
    };
    let rest = || trimmed[keyword.len()..].trim().to_owned();

    match keyword {
        "bestmove" => parse_bestmove(parts),
        "uciok" => Ok(EngineLine::UciOk),
        "readyok" => Ok(EngineLine::ReadyOk),
        "id" => Ok(EngineLine::Id(rest())),
        "info" => Ok(EngineLine::Info(rest())),
        _ => Ok(EngineLine::Other(trimmed.to_owned())),
    }
}

fn parse_bestmove<'a>(mut parts: impl Iterator<Item = &'a str>) -> ChessResult<EngineLine> {
    let token = parts
        .next()
        .ok_or_else(|| ChessError::parse("bestmove without a move"))?;
    if token == "(none)" || token == "0000" {
        return Ok(EngineLine::NoMove);
    }
    let best = LongAlgebraicMove::parse(token)?;

    let ponder = match (parts.next(), parts.next()) {
        (Some("ponder"), Some(reply)) => LongAlgebraicMove::parse(reply).ok(),
        _ => None,
    };

    Ok(EngineLine::BestMove(BestMove { best, ponder }))
}
