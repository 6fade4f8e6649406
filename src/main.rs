use std::io;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use chessies::config::{EngineConfig, EngineOverrides};
use chessies::game_state::chess_types::Color;
use chessies::terminal::TerminalSession;
use chessies::uci::engine_bridge::{EngineBridge, ProcessTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineSide {
    White,
    Black,
    None,
}

/// Play chess in the terminal, optionally against a UCI engine.
#[derive(Debug, Parser)]
#[command(name = "chessies", version)]
struct Args {
    /// Side the engine plays; `none` disables automatic engine turns.
    #[arg(long, value_enum, default_value = "none")]
    engine_plays: EngineSide,

    /// Engine executable [default: $CHESSIES_ENGINE_PATH or stockfish].
    #[arg(long)]
    engine_path: Option<String>,

    /// UCI `Skill Level`, 0-20 [default: $CHESSIES_SKILL_LEVEL or 5].
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=20))]
    skill_level: Option<u8>,

    /// Thinking time per engine move [default: $CHESSIES_MOVETIME_MS or 500].
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// How long to wait on each poll for the engine's reply
    /// [default: $CHESSIES_REPLY_TIMEOUT_MS or 5000].
    #[arg(long)]
    reply_timeout_ms: Option<u64>,

    /// Start without launching the engine process.
    #[arg(long)]
    no_engine: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig::from_env().with_overrides(EngineOverrides {
            engine_path: self.engine_path.clone(),
            skill_level: self.skill_level,
            movetime_ms: self.movetime_ms,
            reply_timeout_ms: self.reply_timeout_ms,
        })
    }

    fn engine_color(&self) -> Option<Color> {
        match self.engine_plays {
            EngineSide::White => Some(Color::White),
            EngineSide::Black => Some(Color::Black),
            EngineSide::None => None,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.engine_config();

    let engine = if args.no_engine {
        None
    } else {
        match EngineBridge::<ProcessTransport>::launch(&config) {
            Ok(bridge) => Some(bridge),
            Err(err) if args.engine_color().is_some() => {
                error!(%err, engine = %config.engine_path, "could not start the engine");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("engine unavailable ({err}), continuing without one");
                None
            }
        }
    };

    let mut session = TerminalSession::new(engine, args.engine_color(), config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match session.run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "terminal session failed");
            ExitCode::FAILURE
        }
    }
}
