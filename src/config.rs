//! External engine settings.

use std::env;
use std::time::Duration;

use tracing::warn;

pub const ENGINE_PATH_ENV: &str = "CHESSIES_ENGINE_PATH";
pub const SKILL_LEVEL_ENV: &str = "CHESSIES_SKILL_LEVEL";
pub const MOVETIME_ENV: &str = "CHESSIES_MOVETIME_MS";
pub const REPLY_TIMEOUT_ENV: &str = "CHESSIES_REPLY_TIMEOUT_MS";

/// UCI `Skill Level` range accepted by common engines.
pub const MAX_SKILL_LEVEL: u8 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub engine_path: String,
    pub skill_level: u8,
    pub movetime_ms: u64,
    /// How long a front-end waits on one poll before it checks back in.
    pub reply_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            engine_path: "stockfish".to_owned(),
            skill_level: 5,
            movetime_ms: 500,
            reply_timeout: Duration::from_secs(5),
        }
    }
}

/// Values given explicitly on the command line; each one that is set wins
/// over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOverrides {
    pub engine_path: Option<String>,
    pub skill_level: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub reply_timeout_ms: Option<u64>,
}

impl EngineConfig {
    /// Defaults overridden by any `CHESSIES_*` variables that are set.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENGINE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.engine_path = path;
        }
        if let Some(level) = parse_var::<u8>(&lookup, SKILL_LEVEL_ENV) {
            config.skill_level = level;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, MOVETIME_ENV) {
            config.movetime_ms = ms;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, REPLY_TIMEOUT_ENV) {
            config.reply_timeout = Duration::from_millis(ms);
        }

        config.clamped()
    }

    pub fn with_overrides(mut self, overrides: EngineOverrides) -> Self {
        if let Some(path) = overrides.engine_path {
            self.engine_path = path;
        }
        if let Some(level) = overrides.skill_level {
            self.skill_level = level;
        }
        if let Some(ms) = overrides.movetime_ms {
            self.movetime_ms = ms;
        }
        if let Some(ms) = overrides.reply_timeout_ms {
            self.reply_timeout = Duration::from_millis(ms);
        }
        self.clamped()
    }

    /// Caps the skill level at [`MAX_SKILL_LEVEL`].
    pub fn clamped(mut self) -> Self {
        if self.skill_level > MAX_SKILL_LEVEL {
            warn!(
                skill_level = self.skill_level,
                max = MAX_SKILL_LEVEL,
                "skill level out of range, clamping"
            );
            self.skill_level = MAX_SKILL_LEVEL;
        }
        self
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(pairs: &[(&str, &str)]) -> EngineConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        EngineConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(from_map(&[]), EngineConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = from_map(&[
            (ENGINE_PATH_ENV, "/usr/games/stockfish"),
            (SKILL_LEVEL_ENV, "12"),
            (MOVETIME_ENV, "1500"),
            (REPLY_TIMEOUT_ENV, "250"),
        ]);
        assert_eq!(config.engine_path, "/usr/games/stockfish");
        assert_eq!(config.skill_level, 12);
        assert_eq!(config.movetime_ms, 1500);
        assert_eq!(config.reply_timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_values_are_ignored_and_skill_is_clamped() {
        let config = from_map(&[(MOVETIME_ENV, "soon"), (SKILL_LEVEL_ENV, "99")]);
        assert_eq!(config.movetime_ms, EngineConfig::default().movetime_ms);
        assert_eq!(config.skill_level, MAX_SKILL_LEVEL);
    }

    #[test]
    fn flags_win_over_environment_field_by_field() {
        let config = from_map(&[(ENGINE_PATH_ENV, "/opt/engine"), (MOVETIME_ENV, "900")])
            .with_overrides(EngineOverrides {
                movetime_ms: Some(50),
                skill_level: Some(30),
                ..EngineOverrides::default()
            });
        assert_eq!(config.engine_path, "/opt/engine");
        assert_eq!(config.movetime_ms, 50);
        assert_eq!(config.skill_level, MAX_SKILL_LEVEL);
        assert_eq!(config.reply_timeout, EngineConfig::default().reply_timeout);
    }

    #[test]
    fn no_flags_keeps_the_environment() {
        let env_config = from_map(&[(SKILL_LEVEL_ENV, "3")]);
        assert_eq!(
            env_config.clone().with_overrides(EngineOverrides::default()),
            env_config
        );
    }
}
