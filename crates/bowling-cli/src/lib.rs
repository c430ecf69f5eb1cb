pub mod config;
pub mod console;
pub mod scorecard;

use std::io::{BufRead, Write};

use bowling_core::{GameSummary, SetupError, TurnSequencer};

use config::BowlingConfig;
use console::{ConsoleError, ConsoleLane};

/// Who is playing, as far as the command line already knows.
#[derive(Debug, Clone, Default)]
pub struct PlayerSetup {
    /// Number of players; prompted for when `None`.
    pub players: Option<usize>,
    /// Player names; prompted for when empty.
    pub names: Vec<String>,
}

#[derive(Debug)]
pub enum CliError {
    Console(ConsoleError),
    PlayerCount { count: usize, min: usize, max: usize },
    Setup(SetupError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Console(e) => write!(f, "{e}"),
            Self::PlayerCount { count, min, max } => {
                write!(f, "{count} players requested; between {min} and {max} allowed")
            },
            Self::Setup(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConsoleError> for CliError {
    fn from(e: ConsoleError) -> Self {
        Self::Console(e)
    }
}

impl From<SetupError> for CliError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

fn check_player_count(count: usize, config: &BowlingConfig) -> Result<usize, CliError> {
    if (config.min_players..=config.max_players).contains(&count) {
        Ok(count)
    } else {
        Err(CliError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        })
    }
}

/// Gather the players, then play a full game on `console`.
pub fn run<R: BufRead, W: Write>(
    config: &BowlingConfig,
    setup: &PlayerSetup,
    console: &mut ConsoleLane<R, W>,
) -> Result<GameSummary, CliError> {
    console.greet()?;

    let names = if setup.names.is_empty() {
        let count = match setup.players {
            Some(count) => check_player_count(count, config)?,
            None => console.ask_player_count(config.min_players, config.max_players)?,
        };
        console.ask_player_names(count)?
    } else {
        check_player_count(setup.names.len(), config)?;
        setup.names.clone()
    };

    let mut game = TurnSequencer::new(names)?;
    Ok(game.play(console)?)
}
