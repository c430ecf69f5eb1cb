use serde::{Deserialize, Serialize};

use crate::engine::ScoringEngine;
use crate::frame::InvalidInput;

/// Score entry for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub score: u32,
}

/// Final standings and the player(s) holding the top score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub scores: Vec<PlayerScore>,
    pub winners: Vec<String>,
}

/// The outside world the turn sequencer talks to: where pin-falls come from
/// and where scores are shown.
///
/// Frame and throw numbers are 1-based. `Error` belongs to the implementor
/// (closed input, broken terminal); the sequencer never produces one itself
/// and stops as soon as one is returned.
pub trait Lane {
    type Error;

    /// Ask for the pins knocked down by `player` on this throw.
    fn request_pin_fall(
        &mut self,
        player: &str,
        frame_number: usize,
        throw_number: usize,
    ) -> Result<i32, Self::Error>;

    /// Called when a requested value was refused. The same throw is
    /// requested again afterwards.
    fn reject_throw(&mut self, _player: &str, _reason: &InvalidInput) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after every completed frame with every player's running total.
    fn report_frame_scores(
        &mut self,
        frame_number: usize,
        scores: &[PlayerScore],
    ) -> Result<(), Self::Error>;

    /// Full frame-by-frame state, offered right after `report_frame_scores`.
    fn show_scorecard(&mut self, _players: &[ScoringEngine]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn report_final_scores(&mut self, scores: &[PlayerScore]) -> Result<(), Self::Error>;

    fn report_winners(&mut self, names: &[String]) -> Result<(), Self::Error>;
}
