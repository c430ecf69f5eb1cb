use serde::{Deserialize, Serialize};

use crate::snapshot::InvalidSnapshot;

/// Pins standing on a fresh rack.
pub const PINS: u8 = 10;

/// Why a pin-fall value was refused.
///
/// Every variant is recoverable: the caller re-requests the same throw and the
/// frame is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// Pin count outside `0..=10`.
    OutOfRange(i32),
    /// More pins than are standing on the deck.
    TooManyPins { pins: u8, standing: u8 },
    /// The frame already holds all the throws it permits.
    FrameComplete,
    /// Every player has finished the final frame.
    GameComplete,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(pins) => {
                write!(f, "invalid pin count {pins}: must be between 0 and {PINS}")
            },
            Self::TooManyPins { pins, standing } => {
                write!(f, "cannot knock down {pins} pins: only {standing} standing")
            },
            Self::FrameComplete => write!(f, "frame is already complete"),
            Self::GameComplete => write!(f, "game is already complete"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Scoring classification of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameMark {
    InProgress,
    Strike,
    Spare,
    Open,
}

/// Throw-acceptance state of a frame.
///
/// `TwoThrows` is only observable in the final frame, while it waits for the
/// bonus ball earned by a strike or spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStatus {
    Empty,
    OneThrow,
    TwoThrows,
    Complete,
}

/// The throws one player recorded in one of the ten frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrameSnapshot")]
pub struct Frame {
    throws: Vec<u8>,
    is_final: bool,
}

#[derive(Deserialize)]
struct FrameSnapshot {
    throws: Vec<i32>,
    is_final: bool,
}

impl TryFrom<FrameSnapshot> for Frame {
    type Error = InvalidSnapshot;

    /// Replay the stored throws so a loaded frame obeys the same rules as a
    /// bowled one.
    fn try_from(raw: FrameSnapshot) -> Result<Self, Self::Error> {
        let mut frame = Frame::new(raw.is_final);
        for (index, pins) in raw.throws.into_iter().enumerate() {
            frame
                .record_throw(pins)
                .map_err(|reason| InvalidSnapshot::Throw { index, reason })?;
        }
        Ok(frame)
    }
}

impl Frame {
    /// Create an empty frame. The final (tenth) frame accepts bonus throws.
    pub fn new(is_final: bool) -> Self {
        Self {
            throws: Vec::with_capacity(if is_final { 3 } else { 2 }),
            is_final,
        }
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn throws(&self) -> &[u8] {
        &self.throws
    }

    /// First recorded value, or 0 when nothing has been thrown yet.
    pub fn first_throw(&self) -> u8 {
        self.throw_at(0)
    }

    /// Second recorded value, or 0 when it has not been thrown.
    pub fn second_throw(&self) -> u8 {
        self.throw_at(1)
    }

    /// Bonus ball of the final frame, or 0 when it has not been thrown.
    pub fn third_throw(&self) -> u8 {
        self.throw_at(2)
    }

    fn throw_at(&self, index: usize) -> u8 {
        self.throws.get(index).copied().unwrap_or(0)
    }

    /// Sum of every recorded throw.
    pub fn pins(&self) -> u32 {
        self.throws.iter().map(|&p| u32::from(p)).sum()
    }

    pub fn is_strike(&self) -> bool {
        self.throws.first() == Some(&PINS)
    }

    /// First two throws clear the rack. A final-frame spare keeps this
    /// classification after its bonus ball is recorded.
    pub fn is_spare(&self) -> bool {
        !self.is_strike()
            && self.throws.len() >= 2
            && self.first_throw() + self.second_throw() == PINS
    }

    /// Number of throws this frame permits given what has been recorded.
    pub fn max_throws(&self) -> usize {
        if !self.is_final {
            if self.is_strike() { 1 } else { 2 }
        } else if self.is_strike() || self.is_spare() {
            3
        } else {
            2
        }
    }

    pub fn is_complete(&self) -> bool {
        self.throws.len() >= self.max_throws()
    }

    /// Pins on the deck before the next throw. The final frame re-racks after
    /// a strike or a made spare.
    pub fn standing_pins(&self) -> u8 {
        self.throws.iter().fold(PINS, |standing, &pins| {
            let left = standing.saturating_sub(pins);
            if left == 0 && self.is_final {
                PINS
            } else {
                left
            }
        })
    }

    pub fn status(&self) -> FrameStatus {
        if self.is_complete() {
            return FrameStatus::Complete;
        }
        match self.throws.len() {
            0 => FrameStatus::Empty,
            1 => FrameStatus::OneThrow,
            _ => FrameStatus::TwoThrows,
        }
    }

    pub fn mark(&self) -> FrameMark {
        if self.is_strike() {
            FrameMark::Strike
        } else if self.is_spare() {
            FrameMark::Spare
        } else if self.is_complete() {
            FrameMark::Open
        } else {
            FrameMark::InProgress
        }
    }

    /// Record a pin-fall. On error the frame is unchanged.
    ///
    /// Every frame refuses more pins than are standing, the final frame
    /// included: it only re-racks after a strike or a made spare, so `6, 6`
    /// or `10, 7, 4` there fails with `TooManyPins`.
    pub fn record_throw(&mut self, pins: i32) -> Result<(), InvalidInput> {
        if self.is_complete() {
            return Err(InvalidInput::FrameComplete);
        }
        let count = u8::try_from(pins)
            .ok()
            .filter(|&p| p <= PINS)
            .ok_or(InvalidInput::OutOfRange(pins))?;
        let standing = self.standing_pins();
        if count > standing {
            return Err(InvalidInput::TooManyPins {
                pins: count,
                standing,
            });
        }
        self.throws.push(count);
        Ok(())
    }

    /// Score-sheet symbols, one per throw: `X` strike, `/` spare, `-` miss.
    pub fn notation(&self) -> String {
        let mut out = String::with_capacity(self.throws.len());
        let mut standing = PINS;
        let mut fresh_rack = true;
        for &pins in &self.throws {
            let symbol = match pins {
                p if p == standing && fresh_rack => 'X',
                p if p == standing => '/',
                0 => '-',
                p => char::from(b'0' + p),
            };
            out.push(symbol);
            standing = standing.saturating_sub(pins);
            fresh_rack = standing == 0 && self.is_final;
            if fresh_rack {
                standing = PINS;
            }
        }
        out
    }
}
