use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bowling.toml";

/// Top-level configuration, loaded from `bowling.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BowlingConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub display: DisplayConfig,
}

impl Default for BowlingConfig {
    fn default() -> Self {
        Self {
            min_players: 1,
            max_players: 6,
            display: DisplayConfig::default(),
        }
    }
}

/// What gets printed between frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print every player's running total after each frame.
    pub show_frame_scores: bool,
    /// Print the frame-by-frame score sheet after each frame.
    pub show_scorecard: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_frame_scores: true,
            show_scorecard: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(path, e) => write!(f, "failed to read {}: {e}", path.display()),
            Self::Parse(path, e) => write!(f, "failed to parse {}: {e}", path.display()),
            Self::Invalid(m) => write!(f, "invalid configuration: {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl BowlingConfig {
    /// Check player bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players == 0 {
            return Err(ConfigError::Invalid("min_players must be > 0".to_string()));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::Invalid(format!(
                "min_players ({}) must not exceed max_players ({})",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Load config, then apply env var overrides.
    ///
    /// Lookup order: `explicit` path, `BOWLING_CONFIG`, `bowling.toml` in the
    /// working directory, defaults. An explicitly named file must exist and
    /// parse; a missing or broken `bowling.toml` only logs a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let named = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var("BOWLING_CONFIG")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
        });

        let mut config = match named {
            Some(path) => {
                let cfg = Self::from_file(&path)?;
                tracing::info!(path = %path.display(), "Loaded configuration");
                cfg
            },
            None => match Self::from_file(Path::new(DEFAULT_CONFIG_FILE)) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {DEFAULT_CONFIG_FILE}");
                    cfg
                },
                Err(ConfigError::Read(..)) => {
                    tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Self::default()
                },
                Err(e) => {
                    tracing::warn!("{e}, using defaults");
                    Self::default()
                },
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BOWLING_MIN_PLAYERS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.min_players = n;
        }
        if let Ok(val) = std::env::var("BOWLING_MAX_PLAYERS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.max_players = n;
        }
    }
}
