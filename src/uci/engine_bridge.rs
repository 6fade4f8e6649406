//! Request bookkeeping for an external UCI engine.
//!
//! Outbound lines go through an [`EngineTransport`]; inbound lines arrive on an
//! `mpsc` channel fed by a reader thread. At most one move request is in
//! flight. `reset` abandons the in-flight request and marks its eventual
//! `bestmove` as stale, so it is dropped on arrival instead of being applied to
//! a game it no longer belongs to.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::config::EngineConfig;
use crate::uci::uci_protocol::{parse_engine_line, BestMove, EngineLine, UciCommand};

/// Where outbound UCI lines are written.
pub trait EngineTransport: Send {
    fn send_line(&mut self, line: &str) -> ChessResult<()>;
}

/// An engine child process. Its stdout is drained by a reader thread into the
/// channel handed back by [`ProcessTransport::spawn`].
pub struct ProcessTransport {
    child: Child,
    stdin: ChildStdin,
}

impl ProcessTransport {
    pub fn spawn(engine_path: &str) -> ChessResult<(Self, Receiver<String>)> {
        let mut child = Command::new(engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChessError::engine("engine stdin was not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ChessError::engine("engine stdout was not captured"))?;

        let (line_tx, line_rx) = channel::<String>();
        thread::Builder::new()
            .name("uci-engine-reader".to_owned())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    let Ok(line) = line else { break };
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
            })?;

        info!(engine = engine_path, pid = child.id(), "engine process started");
        Ok((Self { child, stdin }, line_rx))
    }
}

impl EngineTransport for ProcessTransport {
    fn send_line(&mut self, line: &str) -> ChessResult<()> {
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }
}

impl Drop for ProcessTransport {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Outcome of a completed move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineReply {
    Move(BestMove),
    NoMove,
}

pub struct EngineBridge<T: EngineTransport> {
    transport: T,
    lines: Receiver<String>,
    in_flight: bool,
    stale_replies: usize,
}

impl EngineBridge<ProcessTransport> {
    /// Starts the configured engine and sends the opening handshake.
    pub fn launch(config: &EngineConfig) -> ChessResult<Self> {
        let (transport, lines) = ProcessTransport::spawn(&config.engine_path)?;
        let mut bridge = Self::new(transport, lines);
        bridge.send(&UciCommand::Uci)?;
        bridge.send(&UciCommand::SetSkillLevel(config.skill_level))?;
        bridge.send(&UciCommand::IsReady)?;
        Ok(bridge)
    }
}

impl<T: EngineTransport> EngineBridge<T> {
    pub fn new(transport: T, lines: Receiver<String>) -> Self {
        Self {
            transport,
            lines,
            in_flight: false,
            stale_replies: 0,
        }
    }

    /// Asks for a move in `fen`. Fails with `InvalidState` while another
    /// request is still in flight.
    pub fn request_move(&mut self, fen: &str, movetime_ms: u64) -> ChessResult<()> {
        if self.in_flight {
            warn!(fen, "engine request refused, one is already in flight");
            return Err(ChessError::invalid_state("an engine request is already in flight"));
        }
        self.send(&UciCommand::PositionFen(fen.to_owned()))?;
        self.send(&UciCommand::GoMovetime(movetime_ms))?;
        self.in_flight = true;
        Ok(())
    }

    /// Waits up to `timeout` for the answer to the in-flight request.
    /// `Ok(None)` means nothing arrived in time; the request stays in flight.
    pub fn poll_best_move(&mut self, timeout: Duration) -> ChessResult<Option<EngineReply>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = match self.lines.recv_timeout(remaining) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => {
                    self.in_flight = false;
                    return Err(ChessError::engine("engine output closed"));
                }
            };

            let reply = match parse_engine_line(&line) {
                Ok(EngineLine::BestMove(best)) => EngineReply::Move(best),
                Ok(EngineLine::NoMove) => EngineReply::NoMove,
                Ok(other) => {
                    debug!(?other, "engine line skipped");
                    continue;
                }
                Err(err) => {
                    warn!(%line, %err, "unparseable engine line");
                    if self.take_stale() {
                        continue;
                    }
                    self.in_flight = false;
                    return Err(err);
                }
            };

            if self.take_stale() {
                debug!(?reply, "stale engine reply discarded");
                continue;
            }
            if !self.in_flight {
                warn!(?reply, "engine reply with no request in flight");
                continue;
            }
            self.in_flight = false;
            debug!(?reply, "engine reply received");
            return Ok(Some(reply));
        }
    }

    /// Forgets the in-flight request, if any, and starts a new engine game.
    ///
    /// A running search is ended with `stop` first, so its `bestmove` arrives
    /// promptly and is counted off as stale.
    pub fn reset(&mut self) -> ChessResult<()> {
        if self.in_flight {
            self.send(&UciCommand::Stop)?;
            self.in_flight = false;
            self.stale_replies += 1;
            debug!(stale = self.stale_replies, "in-flight engine request abandoned");
        }
        self.send(&UciCommand::UciNewGame)?;
        self.send(&UciCommand::IsReady)
    }

    pub fn shutdown(mut self) -> ChessResult<()> {
        self.send(&UciCommand::Quit)
    }

    fn take_stale(&mut self) -> bool {
        if self.stale_replies == 0 {
            return false;
        }
        self.stale_replies -= 1;
        true
    }

    fn send(&mut self, command: &UciCommand) -> ChessResult<()> {
        let line = command.to_string();
        debug!(%line, "to engine");
        self.transport.send_line(&line)
    }
}
