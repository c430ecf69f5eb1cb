//! Plain-text score sheet: one row of marks and one row of running totals per
//! player.
//!
//! ```text
//! Frame |   1   |   2   |  ...
//! Ada   | X     | 7 /   |  ...
//!       |    20 |    37 |  ...
//! ```

use bowling_core::{FRAME_COUNT, ScoringEngine};

/// Cell width; fits the three marks of a final frame (`X X X`).
const CELL: usize = 5;

fn spaced(notation: &str) -> String {
    notation
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render(players: &[ScoringEngine]) -> String {
    let width = players
        .iter()
        .map(|p| p.name().chars().count())
        .max()
        .unwrap_or(0)
        .max("Frame".len());

    let mut out = format!("{:<width$} |", "Frame");
    for number in 1..=FRAME_COUNT {
        out.push_str(&format!(" {number:^CELL$} |"));
    }
    out.push('\n');

    for player in players {
        out.push_str(&format!("{:<width$} |", player.name()));
        for frame in player.frames() {
            out.push_str(&format!(" {:<CELL$} |", spaced(&frame.notation())));
        }
        out.push('\n');

        out.push_str(&format!("{:<width$} |", ""));
        for total in player.frame_totals() {
            match total {
                Some(total) => out.push_str(&format!(" {total:>CELL$} |")),
                None => out.push_str(&format!(" {:CELL$} |", "")),
            }
        }
        out.push('\n');
    }
    out
}
