pub mod engine;
pub mod frame;
pub mod lane;
pub mod scoring;
pub mod sequencer;
pub mod snapshot;

pub use engine::{FRAME_COUNT, ScoringEngine};
pub use frame::{Frame, FrameMark, FrameStatus, InvalidInput, PINS};
pub use lane::{GameSummary, Lane, PlayerScore};
pub use sequencer::{SetupError, TurnSequencer, TurnState};
pub use snapshot::InvalidSnapshot;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::VecDeque;

    use crate::engine::ScoringEngine;
    use crate::frame::InvalidInput;
    use crate::lane::{Lane, PlayerScore};

    /// Returned once a `ScriptedLane` has handed out every scripted throw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScriptExhausted;

    impl std::fmt::Display for ScriptExhausted {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "scripted throws exhausted")
        }
    }

    impl std::error::Error for ScriptExhausted {}

    /// A lane that plays back a fixed list of pin-falls and records every
    /// report it receives.
    #[derive(Debug, Default)]
    pub struct ScriptedLane {
        throws: VecDeque<i32>,
        pub requests: Vec<(String, usize, usize)>,
        pub rejections: Vec<(String, InvalidInput)>,
        pub frame_reports: Vec<(usize, Vec<PlayerScore>)>,
        pub scorecards_shown: usize,
        pub final_scores: Vec<PlayerScore>,
        pub winners: Vec<String>,
    }

    impl ScriptedLane {
        pub fn new(throws: impl IntoIterator<Item = i32>) -> Self {
            Self {
                throws: throws.into_iter().collect(),
                ..Self::default()
            }
        }

        /// Throws not yet handed out.
        pub fn remaining(&self) -> usize {
            self.throws.len()
        }
    }

    impl Lane for ScriptedLane {
        type Error = ScriptExhausted;

        fn request_pin_fall(
            &mut self,
            player: &str,
            frame_number: usize,
            throw_number: usize,
        ) -> Result<i32, ScriptExhausted> {
            self.requests
                .push((player.to_string(), frame_number, throw_number));
            self.throws.pop_front().ok_or(ScriptExhausted)
        }

        fn reject_throw(
            &mut self,
            player: &str,
            reason: &InvalidInput,
        ) -> Result<(), ScriptExhausted> {
            self.rejections.push((player.to_string(), *reason));
            Ok(())
        }

        fn report_frame_scores(
            &mut self,
            frame_number: usize,
            scores: &[PlayerScore],
        ) -> Result<(), ScriptExhausted> {
            self.frame_reports.push((frame_number, scores.to_vec()));
            Ok(())
        }

        fn show_scorecard(&mut self, _players: &[ScoringEngine]) -> Result<(), ScriptExhausted> {
            self.scorecards_shown += 1;
            Ok(())
        }

        fn report_final_scores(&mut self, scores: &[PlayerScore]) -> Result<(), ScriptExhausted> {
            self.final_scores = scores.to_vec();
            Ok(())
        }

        fn report_winners(&mut self, names: &[String]) -> Result<(), ScriptExhausted> {
            self.winners = names.to_vec();
            Ok(())
        }
    }

    /// Bowl `throws` for a single player, advancing as frames complete.
    pub fn roll_game(name: &str, throws: &[i32]) -> ScoringEngine {
        let mut engine = ScoringEngine::new(name);
        for &pins in throws {
            engine
                .record_throw(pins)
                .expect("scripted throw must be valid");
            engine.advance_frame();
        }
        engine
    }
}
