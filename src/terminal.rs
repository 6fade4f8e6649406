//! Line-oriented terminal front-end.
//!
//! Reads commands, drives a [`ChessGame`] and optionally hands turns to an
//! external engine through an [`EngineBridge`]. All output goes to the writer
//! passed in, so sessions can be scripted in tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::config::EngineConfig;
use crate::game::game_machine::{ChessGame, CommitResult, MoveProposal};
use crate::game::promotion::PendingPromotion;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::uci::engine_bridge::{EngineBridge, EngineReply, EngineTransport};
use crate::utils::algebraic::algebraic_to_square;
use crate::utils::long_algebraic::LongAlgebraicMove;
use crate::utils::render_game_state::render_game_state;

/// Polls without an answer before the engine request is abandoned.
const MAX_ENGINE_POLLS: u32 = 3;

const HELP: &str = "\
commands:
  e2e4 / e7e8q     play a move in long algebraic form
  moves [square]   list legal moves, optionally from one square
  board            print the board
  fen              print the current FEN
  load <fen>       start from a FEN position
  history          print the move list
  go               let the engine play the side to move
  new              restart the game
  quit             leave";

pub struct TerminalSession<T: EngineTransport> {
    game: ChessGame,
    engine: Option<EngineBridge<T>>,
    engine_color: Option<Color>,
    config: EngineConfig,
}

impl<T: EngineTransport> TerminalSession<T> {
    pub fn new(engine: Option<EngineBridge<T>>, engine_color: Option<Color>, config: EngineConfig) -> Self {
        Self {
            game: ChessGame::new(),
            engine,
            engine_color,
            config,
        }
    }

    #[inline]
    pub fn game(&self) -> &ChessGame {
        &self.game
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_game_state(self.game.state()))?;
        writeln!(out, "type 'help' for commands")?;
        self.maybe_engine_turn(out)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let should_quit = self.handle_command(&line, out)?;
            out.flush()?;
            if should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Handles one input line. Returns `true` when the session should end.
    /// Rejected requests are reported on `out` and never end the session.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        if let Some(token) = self.game.pending_promotion() {
            if !matches!(trimmed, "quit" | "exit" | "new") {
                self.handle_promotion_choice(token, trimmed, out)?;
                return Ok(false);
            }
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "quit" | "exit" => {
                if let Some(engine) = self.engine.take() {
                    if let Err(err) = engine.shutdown() {
                        warn!(%err, "engine shutdown failed");
                    }
                }
                return Ok(true);
            }
            "help" => writeln!(out, "{HELP}")?,
            "board" => writeln!(out, "{}", render_game_state(self.game.state()))?,
            "fen" => writeln!(out, "{}", self.game.fen())?,
            "history" => writeln!(out, "{}", format_history(self.game.history_tokens()))?,
            "moves" => self.handle_moves(parts.next(), out)?,
            "new" => {
                self.game.restart();
                self.reset_engine();
                writeln!(out, "{}", render_game_state(self.game.state()))?;
                self.maybe_engine_turn(out)?;
            }
            "load" => {
                let fen = parts.collect::<Vec<_>>().join(" ");
                match ChessGame::from_fen(&fen) {
                    Ok(game) => {
                        self.game = game;
                        self.reset_engine();
                        writeln!(out, "{}", render_game_state(self.game.state()))?;
                        writeln!(out, "status: {}", self.game.current_status())?;
                        self.maybe_engine_turn(out)?;
                    }
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            "go" => self.engine_turn(out)?,
            token => self.handle_move(token, out)?,
        }

        Ok(false)
    }

    fn handle_moves(&self, square: Option<&str>, out: &mut impl Write) -> io::Result<()> {
        let moves = match square.map(algebraic_to_square) {
            None => all_legal_moves(self.game.state()),
            Some(Ok(square)) => self.game.legal_moves(square),
            Some(Err(err)) => return writeln!(out, "error: {err}"),
        };
        let listed: Vec<String> = moves.iter().map(|mv| mv.to_long_algebraic()).collect();
        if listed.is_empty() {
            writeln!(out, "no legal moves")
        } else {
            writeln!(out, "{}", listed.join(" "))
        }
    }

    fn handle_move(&mut self, token: &str, out: &mut impl Write) -> io::Result<()> {
        let proposal = LongAlgebraicMove::parse(token)
            .and_then(|lan| self.game.propose_move(lan.from, lan.to, lan.promotion));

        match proposal {
            Ok(MoveProposal::Committed(result)) => {
                self.report_commit(&result, out)?;
                self.maybe_engine_turn(out)?;
            }
            Ok(MoveProposal::PendingPromotion(_)) => {
                writeln!(out, "promote to? (q, r, b, n)")?;
            }
            Err(ChessError::Parse { .. }) => {
                writeln!(out, "unknown command '{token}', type 'help' for commands")?;
            }
            Err(err) => writeln!(out, "error: {err}")?,
        }
        Ok(())
    }

    fn handle_promotion_choice(
        &mut self,
        token: PendingPromotion,
        answer: &str,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let kind = answer
            .chars()
            .next()
            .filter(|_| answer.chars().count() == 1)
            .and_then(PieceKind::from_char)
            .filter(|kind| kind.is_promotion_target());
        let Some(kind) = kind else {
            return writeln!(out, "promote to? (q, r, b, n)");
        };

        match self.game.resolve_promotion(token, kind) {
            Ok(result) => {
                self.report_commit(&result, out)?;
                self.maybe_engine_turn(out)
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn report_commit(&self, result: &CommitResult, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_game_state(self.game.state()))?;
        writeln!(out, "played {} ({})", result.notation, result.status)
    }

    fn maybe_engine_turn(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.engine_color == Some(self.game.side_to_move()) && !self.game.current_status().is_over() {
            self.engine_turn(out)?;
        }
        Ok(())
    }

    fn engine_turn(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.game.current_status().is_over() {
            return writeln!(out, "error: {}", ChessError::GameOver(self.game.current_status()));
        }
        match self.request_engine_move() {
            Ok(Some(result)) => self.report_commit(&result, out),
            Ok(None) => writeln!(out, "engine did not answer in time"),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn request_engine_move(&mut self) -> ChessResult<Option<CommitResult>> {
        let fen = self.game.fen();
        let engine = self
            .engine
            .as_mut()
            .ok_or_else(|| ChessError::invalid_state("no engine configured"))?;

        engine.request_move(&fen, self.config.movetime_ms)?;
        for attempt in 1..=MAX_ENGINE_POLLS {
            match engine.poll_best_move(self.config.reply_timeout)? {
                Some(EngineReply::Move(best)) => return self.game.apply_engine_reply(&best).map(Some),
                Some(EngineReply::NoMove) => {
                    return Err(ChessError::engine("engine reported no legal move"))
                }
                None => debug!(attempt, "still waiting for the engine"),
            }
        }

        warn!(fen, "engine timed out, abandoning the request");
        engine.reset()?;
        Ok(None)
    }

    fn reset_engine(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(err) = engine.reset() {
                warn!(%err, "engine reset failed");
            }
        }
    }
}

fn format_history(tokens: Vec<&str>) -> String {
    if tokens.is_empty() {
        return "(no moves)".to_owned();
    }
    tokens
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| format!("{}. {}", i + 1, pair.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}
