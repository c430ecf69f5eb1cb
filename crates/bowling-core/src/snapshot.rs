use crate::frame::InvalidInput;
use crate::sequencer::TurnState;

/// Why a stored frame, player or game was refused on load.
///
/// Deserialized values go through the same checks as values built by
/// recording throws, so a restored game can always be played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSnapshot {
    /// A stored throw would not have been accepted by its frame.
    Throw { index: usize, reason: InvalidInput },
    /// A player must have exactly ten frames.
    FrameCount(usize),
    /// Only the last frame may be the final frame.
    FinalFrame(usize),
    /// Current frame index past the last frame.
    CurrentFrame(usize),
    /// An earlier frame is unfinished or a later one already has throws.
    FrameOrder(usize),
    NoPlayers,
    /// Active player index past the player list.
    ActivePlayer(usize),
    /// Turn state does not match the active player's frame.
    State(TurnState),
}

impl std::fmt::Display for InvalidSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Throw { index, reason } => write!(f, "throw {index} rejected: {reason}"),
            Self::FrameCount(n) => write!(f, "expected 10 frames, found {n}"),
            Self::FinalFrame(i) => write!(f, "frame {i} has the wrong final-frame flag"),
            Self::CurrentFrame(i) => write!(f, "current frame {i} is out of range"),
            Self::FrameOrder(i) => write!(f, "frame {i} is out of order with the current frame"),
            Self::NoPlayers => write!(f, "a game needs at least one player"),
            Self::ActivePlayer(i) => write!(f, "active player {i} is out of range"),
            Self::State(state) => write!(f, "turn state {state:?} does not match the active frame"),
        }
    }
}

impl std::error::Error for InvalidSnapshot {}
