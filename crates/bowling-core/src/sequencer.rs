use serde::{Deserialize, Serialize};

use crate::engine::ScoringEngine;
use crate::frame::InvalidInput;
use crate::lane::{GameSummary, Lane, PlayerScore};
use crate::snapshot::InvalidSnapshot;

/// Where the game stands between two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingThrow1,
    AwaitingThrow2,
    /// Final frame bonus ball after a strike or spare.
    AwaitingThrow3,
    FrameComplete,
    GameComplete,
}

impl TurnState {
    /// 1-based throw being awaited, if any.
    pub fn throw_number(self) -> Option<usize> {
        match self {
            Self::AwaitingThrow1 => Some(1),
            Self::AwaitingThrow2 => Some(2),
            Self::AwaitingThrow3 => Some(3),
            Self::FrameComplete | Self::GameComplete => None,
        }
    }

    fn awaiting(throws_recorded: usize) -> Self {
        match throws_recorded {
            0 => Self::AwaitingThrow1,
            1 => Self::AwaitingThrow2,
            _ => Self::AwaitingThrow3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    NoPlayers,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPlayers => write!(f, "a game needs at least one player"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Drives the players through their frames in round-robin order.
///
/// Each player bowls a whole frame, then the next player takes the lane.
/// The game ends once every player has completed the final frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SequencerSnapshot")]
pub struct TurnSequencer {
    players: Vec<ScoringEngine>,
    active: usize,
    state: TurnState,
}

#[derive(Deserialize)]
struct SequencerSnapshot {
    players: Vec<ScoringEngine>,
    active: usize,
    state: TurnState,
}

impl TryFrom<SequencerSnapshot> for TurnSequencer {
    type Error = InvalidSnapshot;

    fn try_from(raw: SequencerSnapshot) -> Result<Self, Self::Error> {
        let Some(player) = raw.players.get(raw.active) else {
            return Err(if raw.players.is_empty() {
                InvalidSnapshot::NoPlayers
            } else {
                InvalidSnapshot::ActivePlayer(raw.active)
            });
        };
        let frame = player.current_frame();
        let consistent = match raw.state {
            TurnState::GameComplete => raw.players.iter().all(ScoringEngine::is_finished),
            TurnState::FrameComplete => frame.is_complete(),
            awaiting => {
                !frame.is_complete() && awaiting == TurnState::awaiting(frame.throws().len())
            },
        };
        if !consistent {
            return Err(InvalidSnapshot::State(raw.state));
        }
        Ok(Self {
            players: raw.players,
            active: raw.active,
            state: raw.state,
        })
    }
}

impl TurnSequencer {
    pub fn new<I, S>(names: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<ScoringEngine> = names.into_iter().map(ScoringEngine::new).collect();
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        tracing::info!(players = players.len(), "New game");
        Ok(Self {
            players,
            active: 0,
            state: TurnState::AwaitingThrow1,
        })
    }

    pub fn players(&self) -> &[ScoringEngine] {
        &self.players
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_player(&self) -> &ScoringEngine {
        &self.players[self.active]
    }

    /// 1-based frame of the active player.
    pub fn frame_number(&self) -> usize {
        self.active_player().current_frame_index() + 1
    }

    pub fn is_complete(&self) -> bool {
        self.state == TurnState::GameComplete
    }

    /// Record the active player's next throw.
    ///
    /// A rejected value leaves the state untouched so the same throw can be
    /// requested again.
    pub fn record(&mut self, pins: i32) -> Result<TurnState, InvalidInput> {
        match self.state {
            TurnState::GameComplete => return Err(InvalidInput::GameComplete),
            TurnState::FrameComplete => return Err(InvalidInput::FrameComplete),
            _ => {},
        }

        let player = &mut self.players[self.active];
        if let Err(err) = player.record_throw(pins) {
            tracing::warn!(player = player.name(), pins, %err, "Throw rejected");
            return Err(err);
        }

        let frame = player.current_frame();
        tracing::debug!(
            player = player.name(),
            frame = player.current_frame_index() + 1,
            pins,
            "Throw recorded"
        );

        self.state = if frame.is_complete() {
            tracing::info!(
                player = player.name(),
                frame = player.current_frame_index() + 1,
                mark = ?frame.mark(),
                score = player.score(),
                "Frame complete"
            );
            TurnState::FrameComplete
        } else {
            TurnState::awaiting(frame.throws().len())
        };
        Ok(self.state)
    }

    /// Hand the lane to the next player after a completed frame.
    ///
    /// Does nothing outside `FrameComplete`.
    pub fn advance(&mut self) -> TurnState {
        if self.state != TurnState::FrameComplete {
            return self.state;
        }
        self.players[self.active].advance_frame();

        if self.players.iter().all(ScoringEngine::is_finished) {
            self.state = TurnState::GameComplete;
            tracing::info!(winners = ?self.winners(), "Game complete");
            return self.state;
        }

        self.active = (self.active + 1) % self.players.len();
        while self.players[self.active].is_finished() {
            self.active = (self.active + 1) % self.players.len();
        }
        self.state = TurnState::AwaitingThrow1;
        self.state
    }

    pub fn standings(&self) -> Vec<PlayerScore> {
        self.players
            .iter()
            .map(|p| PlayerScore {
                name: p.name().to_string(),
                score: p.score(),
            })
            .collect()
    }

    /// Names of every player holding the top score, in turn order.
    pub fn winners(&self) -> Vec<String> {
        let best = self.players.iter().map(ScoringEngine::score).max().unwrap_or(0);
        self.players
            .iter()
            .filter(|p| p.score() == best)
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            scores: self.standings(),
            winners: self.winners(),
        }
    }

    /// Run the game to completion against `lane`.
    pub fn play<L: Lane>(&mut self, lane: &mut L) -> Result<GameSummary, L::Error> {
        loop {
            match self.state.throw_number() {
                Some(throw) => {
                    let name = self.active_player().name().to_string();
                    let pins = lane.request_pin_fall(&name, self.frame_number(), throw)?;
                    if let Err(err) = self.record(pins) {
                        lane.reject_throw(&name, &err)?;
                    }
                },
                None if self.is_complete() => {
                    let summary = self.summary();
                    lane.report_final_scores(&summary.scores)?;
                    lane.report_winners(&summary.winners)?;
                    return Ok(summary);
                },
                None => {
                    lane.report_frame_scores(self.frame_number(), &self.standings())?;
                    lane.show_scorecard(&self.players)?;
                    self.advance();
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedLane;

    fn bowl_all(seq: &mut TurnSequencer, throws: &[i32]) {
        for &pins in throws {
            seq.record(pins).unwrap();
            seq.advance();
        }
    }

    #[test]
    fn empty_player_list_rejected() {
        let names: Vec<String> = Vec::new();
        assert_eq!(TurnSequencer::new(names).unwrap_err(), SetupError::NoPlayers);
    }

    #[test]
    fn open_frame_walks_through_states() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        assert_eq!(seq.state(), TurnState::AwaitingThrow1);
        assert_eq!(seq.record(3), Ok(TurnState::AwaitingThrow2));
        assert_eq!(seq.record(4), Ok(TurnState::FrameComplete));
        assert_eq!(seq.advance(), TurnState::AwaitingThrow1);
        assert_eq!(seq.frame_number(), 2);
    }

    #[test]
    fn strike_completes_frame_immediately() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        assert_eq!(seq.record(10), Ok(TurnState::FrameComplete));
    }

    #[test]
    fn players_rotate_after_each_frame() {
        let mut seq = TurnSequencer::new(["Ada", "Bo", "Cy"]).unwrap();
        seq.record(10).unwrap();
        seq.advance();
        assert_eq!(seq.active_index(), 1);
        assert_eq!(seq.active_player().name(), "Bo");
        assert_eq!(seq.frame_number(), 1);
        seq.record(1).unwrap();
        seq.record(2).unwrap();
        seq.advance();
        assert_eq!(seq.active_player().name(), "Cy");
        seq.record(10).unwrap();
        seq.advance();
        assert_eq!(seq.active_index(), 0);
        assert_eq!(seq.active_player().name(), "Ada");
        assert_eq!(seq.frame_number(), 2);
    }

    #[test]
    fn throw_numbers_follow_state() {
        assert_eq!(TurnState::AwaitingThrow1.throw_number(), Some(1));
        assert_eq!(TurnState::AwaitingThrow3.throw_number(), Some(3));
        assert_eq!(TurnState::FrameComplete.throw_number(), None);
        assert_eq!(TurnState::GameComplete.throw_number(), None);
    }

    #[test]
    fn invalid_throw_keeps_state() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        seq.record(6).unwrap();
        assert!(seq.record(6).is_err());
        assert_eq!(seq.state(), TurnState::AwaitingThrow2);
        assert_eq!(seq.active_player().current_frame().throws(), &[6]);
        assert_eq!(seq.record(11), Err(InvalidInput::OutOfRange(11)));
        assert_eq!(seq.record(4), Ok(TurnState::FrameComplete));
    }

    #[test]
    fn record_refused_between_frames() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        seq.record(10).unwrap();
        assert_eq!(seq.record(1), Err(InvalidInput::FrameComplete));
    }

    #[test]
    fn final_frame_spare_awaits_third_throw() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        bowl_all(&mut seq, &[0; 18]);
        assert_eq!(seq.frame_number(), 10);
        assert_eq!(seq.record(4), Ok(TurnState::AwaitingThrow2));
        assert_eq!(seq.record(6), Ok(TurnState::AwaitingThrow3));
        assert_eq!(seq.record(2), Ok(TurnState::FrameComplete));
        assert_eq!(seq.advance(), TurnState::GameComplete);
        assert_eq!(seq.record(1), Err(InvalidInput::GameComplete));
    }

    #[test]
    fn final_frame_open_ends_after_two() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        bowl_all(&mut seq, &[0; 18]);
        seq.record(4).unwrap();
        assert_eq!(seq.record(3), Ok(TurnState::FrameComplete));
        assert_eq!(seq.advance(), TurnState::GameComplete);
    }

    #[test]
    fn game_waits_for_every_player() {
        let mut seq = TurnSequencer::new(["Ada", "Bo"]).unwrap();
        for _ in 0..9 {
            bowl_all(&mut seq, &[10, 10]);
        }
        bowl_all(&mut seq, &[10, 10, 10]);
        assert!(!seq.is_complete());
        assert_eq!(seq.active_player().name(), "Bo");
        bowl_all(&mut seq, &[0, 0]);
        assert!(seq.is_complete());
        assert_eq!(seq.winners(), vec!["Ada".to_string()]);
    }

    #[test]
    fn ties_report_every_winner() {
        let mut seq = TurnSequencer::new(["Ada", "Bo", "Cy"]).unwrap();
        for _ in 0..10 {
            bowl_all(&mut seq, &[3, 4, 3, 4, 0, 0]);
        }
        assert!(seq.is_complete());
        assert_eq!(seq.winners(), vec!["Ada".to_string(), "Bo".to_string()]);
        let summary = seq.summary();
        assert_eq!(summary.scores[0].score, 70);
        assert_eq!(summary.scores[2].score, 0);
    }

    #[test]
    fn play_reports_through_lane() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        let mut lane = ScriptedLane::new([10; 12]);
        let summary = seq.play(&mut lane).unwrap();

        assert_eq!(summary.winners, vec!["Ada".to_string()]);
        assert_eq!(summary.scores[0].score, 300);
        assert_eq!(lane.frame_reports.len(), 10);
        assert_eq!(lane.frame_reports[0].0, 1);
        assert_eq!(lane.frame_reports[9].0, 10);
        assert_eq!(lane.final_scores, summary.scores);
        assert_eq!(lane.winners, summary.winners);
        assert_eq!(lane.requests.last(), Some(&("Ada".to_string(), 10, 3)));
        assert_eq!(lane.remaining(), 0);
    }

    #[test]
    fn play_rerequests_rejected_throw() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        let mut throws = vec![11, -1, 6, 6, 3];
        throws.extend([0; 18]);
        let mut lane = ScriptedLane::new(throws);
        let summary = seq.play(&mut lane).unwrap();

        assert_eq!(summary.scores[0].score, 9);
        assert_eq!(lane.rejections.len(), 3);
        assert_eq!(lane.rejections[0].1, InvalidInput::OutOfRange(11));
        assert_eq!(
            &lane.requests[..4],
            &[
                ("Ada".to_string(), 1, 1),
                ("Ada".to_string(), 1, 1),
                ("Ada".to_string(), 1, 1),
                ("Ada".to_string(), 1, 2),
            ]
        );
    }

    #[test]
    fn play_stops_on_lane_error() {
        let mut seq = TurnSequencer::new(["Ada"]).unwrap();
        let mut lane = ScriptedLane::new([10, 10]);
        assert!(seq.play(&mut lane).is_err());
        assert_eq!(seq.active_player().current_frame_index(), 2);
    }

    #[test]
    fn snapshot_resumes_mid_game() {
        let mut seq = TurnSequencer::new(["Ada", "Bo"]).unwrap();
        bowl_all(&mut seq, &[10, 3]);
        let json = serde_json::to_string(&seq).unwrap();

        let mut restored: TurnSequencer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.active_index(), 1);
        assert_eq!(restored.state(), TurnState::AwaitingThrow2);
        assert_eq!(restored.record(7), Ok(TurnState::FrameComplete));
        assert_eq!(restored.advance(), TurnState::AwaitingThrow1);
        assert_eq!(restored.active_player().name(), "Ada");
    }

    #[test]
    fn snapshot_without_players_rejected() {
        let err = serde_json::from_str::<TurnSequencer>(
            r#"{"players":[],"active":0,"state":"FrameComplete"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least one player"));
    }

    #[test]
    fn snapshot_inconsistent_turn_rejected() {
        let seq = TurnSequencer::new(["Ada"]).unwrap();

        let mut json = serde_json::to_value(&seq).unwrap();
        json["active"] = 1.into();
        let err = serde_json::from_value::<TurnSequencer>(json).unwrap_err();
        assert!(err.to_string().contains("active player 1 is out of range"));

        for state in ["FrameComplete", "GameComplete", "AwaitingThrow2"] {
            let mut json = serde_json::to_value(&seq).unwrap();
            json["state"] = state.into();
            let err = serde_json::from_value::<TurnSequencer>(json).unwrap_err();
            assert!(err.to_string().contains(state), "{state}: {err}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_games_always_finish(
                players in 1usize..=4,
                rolls in proptest::collection::vec(0i32..=10, 84)
            ) {
                let names: Vec<String> = (0..players).map(|i| format!("P{i}")).collect();
                let mut seq = TurnSequencer::new(names).unwrap();
                let mut rolls = rolls.into_iter();
                while !seq.is_complete() {
                    let standing = i32::from(seq.active_player().current_frame().standing_pins());
                    let pins = rolls.next().unwrap_or(0).min(standing);
                    seq.record(pins).unwrap();
                    seq.advance();
                }
                let summary = seq.summary();
                prop_assert_eq!(summary.scores.len(), players);
                prop_assert!(!summary.winners.is_empty());
                prop_assert!(summary.scores.iter().all(|s| s.score <= 300));
            }
        }
    }
}
