//! Bonus resolution and score aggregation over a player's frames.
//!
//! Scoring rules:
//! - Strike: 10 + the next two individual throws, wherever they fall
//! - Spare: 10 + the next throw
//! - Open frame: the pins knocked down
//! - Final frame: the sum of its own throws, bonus balls included
//!
//! Totals are always recomputed from the raw throws.

use crate::frame::{Frame, PINS};

/// The next `count` individual throws recorded after frame `index`.
fn throws_after(frames: &[Frame], index: usize, count: usize) -> impl Iterator<Item = u32> + '_ {
    frames
        .iter()
        .skip(index + 1)
        .flat_map(|frame| frame.throws().iter())
        .take(count)
        .map(|&pins| u32::from(pins))
}

/// Sum of the next two throws after a strike in frame `index`. Back-to-back
/// strikes pull the second ball from two frames ahead. Missing throws count 0.
pub fn strike_bonus(frames: &[Frame], index: usize) -> u32 {
    throws_after(frames, index, 2).sum()
}

/// The first throw after a spare in frame `index`, or 0 if not yet thrown.
pub fn spare_bonus(frames: &[Frame], index: usize) -> u32 {
    throws_after(frames, index, 1).sum()
}

/// Contribution of frame `index` to the total.
pub fn frame_value(frames: &[Frame], index: usize) -> u32 {
    let Some(frame) = frames.get(index) else {
        return 0;
    };
    if frame.is_final() {
        frame.pins()
    } else if frame.is_strike() {
        u32::from(PINS) + strike_bonus(frames, index)
    } else if frame.is_spare() {
        u32::from(PINS) + spare_bonus(frames, index)
    } else {
        frame.pins()
    }
}

/// Total score for frames `0..=upto`.
pub fn total_score(frames: &[Frame], upto: usize) -> u32 {
    (0..frames.len().min(upto.saturating_add(1)))
        .map(|index| frame_value(frames, index))
        .sum()
}

/// Whether frame `index` is complete and every bonus throw it needs is known.
pub fn is_resolved(frames: &[Frame], index: usize) -> bool {
    let Some(frame) = frames.get(index) else {
        return false;
    };
    if !frame.is_complete() {
        return false;
    }
    let needed = if frame.is_final() {
        0
    } else if frame.is_strike() {
        2
    } else if frame.is_spare() {
        1
    } else {
        0
    };
    throws_after(frames, index, needed).count() == needed
}

/// Cumulative total after each frame, as written on a score sheet.
///
/// A frame whose bonus is still pending shows `None`, and so does every frame
/// after it.
pub fn running_totals(frames: &[Frame]) -> Vec<Option<u32>> {
    let mut total = 0;
    let mut resolved = true;
    (0..frames.len())
        .map(|index| {
            resolved = resolved && is_resolved(frames, index);
            if resolved {
                total += frame_value(frames, index);
                Some(total)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lay `throws` into ten frames the way a lane would.
    fn frames_from(throws: &[i32]) -> Vec<Frame> {
        let mut frames: Vec<Frame> = (0..10).map(|i| Frame::new(i == 9)).collect();
        let mut index = 0;
        for &pins in throws {
            if frames[index].is_complete() {
                index += 1;
            }
            frames[index].record_throw(pins).unwrap();
        }
        frames
    }

    #[test]
    fn perfect_game() {
        let frames = frames_from(&[10; 12]);
        assert_eq!(total_score(&frames, 9), 300);
    }

    #[test]
    fn gutter_game() {
        let frames = frames_from(&[0; 20]);
        assert_eq!(total_score(&frames, 9), 0);
    }

    #[test]
    fn all_fives() {
        let frames = frames_from(&[5; 21]);
        assert_eq!(total_score(&frames, 9), 150);
    }

    #[test]
    fn strike_then_open() {
        let mut throws = vec![10, 3, 4];
        throws.extend([0; 16]);
        let frames = frames_from(&throws);
        assert_eq!(frame_value(&frames, 0), 17);
        assert_eq!(frame_value(&frames, 1), 7);
        assert_eq!(total_score(&frames, 9), 24);
    }

    #[test]
    fn spare_takes_next_ball() {
        let frames = frames_from(&[5, 5, 3]);
        assert_eq!(frame_value(&frames, 0), 13);
    }

    #[test]
    fn double_strike_reaches_two_frames_ahead() {
        let frames = frames_from(&[10, 10, 4, 2]);
        assert_eq!(strike_bonus(&frames, 0), 14);
        assert_eq!(frame_value(&frames, 0), 24);
        assert_eq!(frame_value(&frames, 1), 16);
        assert_eq!(total_score(&frames, 2), 46);
    }

    #[test]
    fn pending_bonus_counts_zero() {
        let frames = frames_from(&[10, 10]);
        assert_eq!(frame_value(&frames, 0), 20);
        assert_eq!(total_score(&frames, 1), 30);
        assert!(!is_resolved(&frames, 0));
    }

    #[test]
    fn ninth_frame_strike_uses_final_frame_balls() {
        let mut throws = vec![0; 16];
        throws.extend([10, 10, 10, 10]);
        let frames = frames_from(&throws);
        assert_eq!(frame_value(&frames, 8), 30);
        assert_eq!(frame_value(&frames, 9), 30);
        assert_eq!(total_score(&frames, 9), 60);
    }

    #[test]
    fn running_totals_wait_for_bonus() {
        let frames = frames_from(&[10, 3]);
        assert_eq!(running_totals(&frames)[0], None);

        let frames = frames_from(&[10, 3, 4, 5]);
        let totals = running_totals(&frames);
        assert_eq!(totals[0], Some(17));
        assert_eq!(totals[1], Some(24));
        assert_eq!(totals[2], None);
    }

    #[test]
    fn running_totals_perfect_game() {
        let frames = frames_from(&[10; 12]);
        let totals = running_totals(&frames);
        let expected: Vec<Option<u32>> = (1..=10).map(|i| Some(i * 30)).collect();
        assert_eq!(totals, expected);
    }

    #[test]
    fn out_of_range_index_is_zero() {
        let frames = frames_from(&[3, 4]);
        assert_eq!(frame_value(&frames, 42), 0);
        assert_eq!(total_score(&[], 9), 0);
    }
}
