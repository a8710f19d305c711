//! Date command: show or move the simulated current date.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use fz_core::{MatchBoard, MatchStatus, SimulatedClock};

use super::util::{fixture_label, parse_date_arg};
use crate::Source;

pub fn show<W: Write>(writer: &mut W, source: &Source) -> Result<()> {
    writeln!(writer, "{}", source.current_date()?)?;
    Ok(())
}

/// Moves the simulated date and reports what is live on the new date.
///
/// The input is resolved against the current simulated date and validated
/// before anything is written to the source.
pub fn set<W: Write>(
    writer: &mut W,
    source: &mut Source,
    input: &str,
    today: NaiveDate,
) -> Result<()> {
    let mut clock = SimulatedClock::new(source.current_date()?);
    let mut watcher = clock.subscribe();
    let previous = clock.get();

    let target = parse_date_arg(input, previous, today)?;
    let committed = source.set_current_date(target)?;
    clock.set_date(committed);

    let date = watcher.poll().unwrap_or_else(|| watcher.latest());
    let board = MatchBoard::build(date, &source.matches()?);
    write!(writer, "{}", format_date_change(previous, &board))?;
    Ok(())
}

/// Format the date transition and the matches now in progress.
pub fn format_date_change(previous: NaiveDate, board: &MatchBoard) -> String {
    let mut output = String::new();

    writeln!(output, "Simulated date: {previous} -> {}", board.date).unwrap();

    let live: Vec<_> = board.with_status(MatchStatus::Live).collect();
    if live.is_empty() {
        writeln!(output, "No matches today.").unwrap();
        return output;
    }

    writeln!(output, "Today's matches:").unwrap();
    for m in live {
        let badge = if m.is_in_progress() { "LIVE" } else { "FT" };
        write!(output, "  [{badge}] {}", fixture_label(&m.fixture)).unwrap();
        if let Some(time) = &m.fixture.time {
            write!(output, " at {time}").unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use fz_core::{MatchRecord, MatchResult, parse_date};
    use insta::assert_snapshot;

    fn record(id: u32, date: &str, teams: (&str, &str), result: Option<(u32, u32)>) -> MatchRecord {
        MatchRecord {
            id: Some(id),
            team_a: Some(teams.0.to_string()),
            team_b: Some(teams.1.to_string()),
            date: Some(date.to_string()),
            time: Some("18:00".to_string()),
            stage: Some("group".to_string()),
            group: Some("A".to_string()),
            result: result.map(|(a, b)| MatchResult::new(a, b)),
            ..MatchRecord::default()
        }
    }

    #[test]
    fn date_change_lists_todays_matches() {
        let records = vec![
            record(1, "2034-06-15", ("Saudi Arabia", "Japan"), Some((2, 1))),
            record(2, "2034-06-15", ("Brazil", "Ghana"), None),
            record(3, "2034-06-16", ("Peru", "Mexico"), None),
        ];
        let board = MatchBoard::build(parse_date("2034-06-15").unwrap(), &records);

        assert_snapshot!(format_date_change(parse_date("2034-06-13").unwrap(), &board), @r"
        Simulated date: 2034-06-13 -> 2034-06-15
        Today's matches:
          [FT] Saudi Arabia 2 - 1 Japan at 18:00
          [LIVE] Brazil vs Ghana at 18:00
        ");
    }

    #[test]
    fn date_change_without_matches() {
        let board = MatchBoard::build(parse_date("2034-08-01").unwrap(), &[]);
        let output = format_date_change(parse_date("2034-07-31").unwrap(), &board);
        assert_eq!(
            output,
            "Simulated date: 2034-07-31 -> 2034-08-01\nNo matches today.\n"
        );
    }

    #[test]
    fn set_validates_before_writing() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("date.json"), r#"{"date": "2034-06-13"}"#).unwrap();
        let mut source = Source::local(temp.path()).unwrap();
        let today = parse_date("2026-10-19").unwrap();

        let mut output = Vec::new();
        assert!(set(&mut output, &mut source, "2034-13-01", today).is_err());
        assert_eq!(
            source.current_date().unwrap(),
            parse_date("2034-06-13").unwrap()
        );

        set(&mut output, &mut source, "+2", today).unwrap();
        assert_eq!(
            source.current_date().unwrap(),
            parse_date("2034-06-15").unwrap()
        );
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Simulated date: 2034-06-13 -> 2034-06-15"));
    }
}
