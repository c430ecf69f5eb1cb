use std::io::{BufRead, Write};

use bowling_core::{InvalidInput, Lane, PINS, PlayerScore, ScoringEngine};

use crate::config::DisplayConfig;
use crate::scorecard;

#[derive(Debug)]
pub enum ConsoleError {
    Io(std::io::Error),
    /// Input closed while a value was still expected.
    EndOfInput,
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "console I/O error: {e}"),
            Self::EndOfInput => write!(f, "input closed before the game finished"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<std::io::Error> for ConsoleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Text prompt over any line reader and writer (stdin/stdout in the binary).
pub struct ConsoleLane<R, W> {
    input: R,
    output: W,
    display: DisplayConfig,
}

impl<R: BufRead, W: Write> ConsoleLane<R, W> {
    pub fn new(input: R, output: W, display: DisplayConfig) -> Self {
        Self {
            input,
            output,
            display,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    pub fn greet(&mut self) -> Result<(), ConsoleError> {
        writeln!(self.output, "Starting a new game of bowling.")?;
        Ok(())
    }

    /// Ask until a count within `min..=max` is entered.
    pub fn ask_player_count(&mut self, min: usize, max: usize) -> Result<usize, ConsoleError> {
        loop {
            let answer =
                self.prompt(&format!("Enter the number of players (between {min} and {max}): "))?;
            match answer.parse::<usize>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                _ => {
                    tracing::debug!(answer = %answer, "Rejected player count");
                    writeln!(
                        self.output,
                        "Invalid number of players. Please enter a number between {min} and {max}."
                    )?;
                },
            }
        }
    }

    /// Ask for each player's name. A blank answer becomes "Player N".
    pub fn ask_player_names(&mut self, count: usize) -> Result<Vec<String>, ConsoleError> {
        let mut names = Vec::with_capacity(count);
        for n in 1..=count {
            let name = self.prompt(&format!("Enter the name of player {n}: "))?;
            names.push(if name.is_empty() {
                format!("Player {n}")
            } else {
                name
            });
        }
        Ok(names)
    }

    fn print_scores(&mut self, scores: &[PlayerScore]) -> Result<(), ConsoleError> {
        for entry in scores {
            writeln!(self.output, "{}: {}", entry.name, entry.score)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Lane for ConsoleLane<R, W> {
    type Error = ConsoleError;

    fn request_pin_fall(
        &mut self,
        player: &str,
        frame_number: usize,
        throw_number: usize,
    ) -> Result<i32, ConsoleError> {
        writeln!(self.output, "Frame {frame_number}, throw {throw_number}.")?;
        loop {
            let answer = self.prompt(&format!("{player}, how many pins did you knock down? "))?;
            match answer.parse::<i32>() {
                Ok(pins) => return Ok(pins),
                Err(_) => writeln!(
                    self.output,
                    "Invalid pin count. Please enter a number between 0 and {PINS}."
                )?,
            }
        }
    }

    fn reject_throw(&mut self, _player: &str, reason: &InvalidInput) -> Result<(), ConsoleError> {
        writeln!(self.output, "Invalid throw: {reason}. Please try again.")?;
        Ok(())
    }

    fn report_frame_scores(
        &mut self,
        frame_number: usize,
        scores: &[PlayerScore],
    ) -> Result<(), ConsoleError> {
        if self.display.show_frame_scores {
            writeln!(self.output, "Score after frame {frame_number}:")?;
            self.print_scores(scores)?;
        }
        Ok(())
    }

    fn show_scorecard(&mut self, players: &[ScoringEngine]) -> Result<(), ConsoleError> {
        if self.display.show_scorecard {
            write!(self.output, "{}", scorecard::render(players))?;
        }
        Ok(())
    }

    fn report_final_scores(&mut self, scores: &[PlayerScore]) -> Result<(), ConsoleError> {
        writeln!(self.output, "Final score:")?;
        self.print_scores(scores)
    }

    fn report_winners(&mut self, names: &[String]) -> Result<(), ConsoleError> {
        match names {
            [winner] => writeln!(self.output, "{winner} wins!")?,
            _ => writeln!(
                self.output,
                "It's a tie between the following players: {}",
                names.join(", ")
            )?,
        }
        Ok(())
    }
}
