//! Status command for showing the data source and simulated date.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use fz_core::{MatchBoard, MatchStatus};

use super::util::load_board;
use crate::Source;

/// Format the status summary for one board.
pub fn format_status(source: &str, board: &MatchBoard) -> String {
    let mut output = String::new();

    writeln!(output, "Fan dashboard status").unwrap();
    writeln!(output, "Source: {source}").unwrap();
    writeln!(output, "Simulated date: {}", board.date).unwrap();

    if board.matches.is_empty() {
        writeln!(output, "No matches scheduled.").unwrap();
    } else {
        writeln!(
            output,
            "Matches: {} ({} past, {} live, {} upcoming)",
            board.matches.len(),
            board.with_status(MatchStatus::Past).count(),
            board.with_status(MatchStatus::Live).count(),
            board.with_status(MatchStatus::Upcoming).count(),
        )
        .unwrap();
        writeln!(output, "Results recorded: {}", board.decided()).unwrap();
    }

    if !board.skipped.is_empty() {
        writeln!(output, "Skipped records: {}", board.skipped.len()).unwrap();
        for err in &board.skipped {
            writeln!(output, "- {err}").unwrap();
        }
    }

    output
}

pub fn run<W: Write>(writer: &mut W, source: &Source) -> Result<()> {
    let board = load_board(source)?;
    write!(writer, "{}", format_status(&source.describe(), &board))?;
    Ok(())
}
