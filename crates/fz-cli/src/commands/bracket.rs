//! Bracket command: knockout rounds in progression order.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::NaiveDate;
use fz_core::{Bracket, Match};

use super::util::{fixture_label, load_board};
use crate::Source;

fn match_line(m: &Match) -> String {
    let mut line = format!("  #{:<3} {}  {}", m.id, m.date, fixture_label(m));
    if let Some(winner) = m.winner.as_deref().filter(|_| m.result.is_some()) {
        write!(line, "  (winner: {winner})").unwrap();
    }
    line
}

/// Format every knockout round, including empty ones.
pub fn format_bracket(date: NaiveDate, bracket: &Bracket) -> String {
    let mut output = String::new();

    writeln!(output, "KNOCKOUT BRACKET (simulated date {date})").unwrap();

    if bracket.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No knockout matches scheduled.").unwrap();
        return output;
    }

    for (stage, matches) in bracket.rounds() {
        writeln!(output).unwrap();
        writeln!(output, "{}", stage.label()).unwrap();
        if matches.is_empty() {
            writeln!(output, "  (no matches)").unwrap();
        }
        for m in matches {
            writeln!(output, "{}", match_line(m)).unwrap();
        }
    }

    output
}

pub fn format_bracket_json(bracket: &Bracket) -> Result<String> {
    Ok(serde_json::to_string_pretty(bracket)?)
}

/// Runs the bracket command.
pub fn run(source: &Source, json: bool) -> Result<()> {
    let board = load_board(source)?;
    if json {
        println!("{}", format_bracket_json(&board.bracket)?);
    } else {
        print!("{}", format_bracket(board.date, &board.bracket));
    }
    Ok(())
}
