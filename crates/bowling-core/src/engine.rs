use serde::{Deserialize, Serialize};

use crate::frame::{Frame, InvalidInput};
use crate::scoring::{running_totals, total_score};
use crate::snapshot::InvalidSnapshot;

/// Frames in a game of ten-pin.
pub const FRAME_COUNT: usize = 10;

/// One player's frames and running score.
///
/// The score is never stored: `score()` recomputes it from the recorded
/// throws every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EngineSnapshot")]
pub struct ScoringEngine {
    name: String,
    frames: Vec<Frame>,
    current_frame: usize,
}

#[derive(Deserialize)]
struct EngineSnapshot {
    name: String,
    frames: Vec<Frame>,
    current_frame: usize,
}

impl TryFrom<EngineSnapshot> for ScoringEngine {
    type Error = InvalidSnapshot;

    fn try_from(raw: EngineSnapshot) -> Result<Self, Self::Error> {
        if raw.frames.len() != FRAME_COUNT {
            return Err(InvalidSnapshot::FrameCount(raw.frames.len()));
        }
        if raw.current_frame >= FRAME_COUNT {
            return Err(InvalidSnapshot::CurrentFrame(raw.current_frame));
        }
        for (i, frame) in raw.frames.iter().enumerate() {
            if frame.is_final() != (i == FRAME_COUNT - 1) {
                return Err(InvalidSnapshot::FinalFrame(i));
            }
            let in_order = if i < raw.current_frame {
                frame.is_complete()
            } else {
                i == raw.current_frame || frame.throws().is_empty()
            };
            if !in_order {
                return Err(InvalidSnapshot::FrameOrder(i));
            }
        }
        Ok(Self {
            name: raw.name,
            frames: raw.frames,
            current_frame: raw.current_frame,
        })
    }
}

impl ScoringEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: (0..FRAME_COUNT)
                .map(|i| Frame::new(i == FRAME_COUNT - 1))
                .collect(),
            current_frame: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Index (0-based) of the frame currently being bowled.
    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current_frame]
    }

    /// Record a pin-fall into the current frame.
    pub fn record_throw(&mut self, pins: i32) -> Result<(), InvalidInput> {
        self.frames[self.current_frame].record_throw(pins)
    }

    pub fn is_current_frame_complete(&self) -> bool {
        self.current_frame().is_complete()
    }

    /// Move to the next frame once the current one is complete.
    ///
    /// Returns `false` (and stays put) while the current frame is still open
    /// or when it is the final frame.
    pub fn advance_frame(&mut self) -> bool {
        if !self.is_current_frame_complete() || self.current_frame + 1 >= FRAME_COUNT {
            return false;
        }
        self.current_frame += 1;
        true
    }

    /// The final frame has received every throw it permits.
    pub fn is_finished(&self) -> bool {
        self.current_frame == FRAME_COUNT - 1 && self.is_current_frame_complete()
    }

    pub fn score(&self) -> u32 {
        total_score(&self.frames, self.current_frame)
    }

    /// Cumulative score-sheet totals, `None` where a bonus is pending.
    pub fn frame_totals(&self) -> Vec<Option<u32>> {
        running_totals(&self.frames)
    }
}
