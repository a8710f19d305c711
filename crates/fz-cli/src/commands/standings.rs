//! Standings command: group tables on the simulated date.

use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use fz_core::standings::{QUALIFYING_PLACES, qualifiers, result_counts};
use fz_core::{GroupId, Match, Stage, Standings, TeamStat};

use super::util::load_board;
use crate::Source;

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn write_table(output: &mut String, table: &[TeamStat]) {
    writeln!(
        output,
        "{:>3}  {:<20}  {:>2}  {:>2}  {:>2}  {:>2}  {:>3}  {:>3}  {:>4}  {:>3}",
        "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    )
    .unwrap();

    let advancing = qualifiers(table).len();
    for (index, stat) in table.iter().enumerate() {
        let marker = if index < advancing { " *" } else { "" };
        writeln!(
            output,
            "{:>3}  {:<20}  {:>2}  {:>2}  {:>2}  {:>2}  {:>3}  {:>3}  {:>4}  {:>3}{marker}",
            index + 1,
            stat.team.as_str(),
            stat.played,
            stat.won,
            stat.drawn,
            stat.lost,
            stat.goals_for,
            stat.goals_against,
            signed(stat.goal_difference),
            stat.points,
        )
        .unwrap();
    }
}

// ========== Human-Readable Output ==========

/// Format group tables, with result counts taken from `matches`.
pub fn format_standings(date: NaiveDate, standings: &Standings, matches: &[Match]) -> String {
    let mut output = String::new();

    writeln!(output, "GROUP STANDINGS (simulated date {date})").unwrap();

    if standings.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No group matches found.").unwrap();
        return output;
    }

    for (group, table) in standings {
        let (decisive, drawn) = result_counts(
            matches
                .iter()
                .filter(|m| m.stage == Stage::Group && m.group.as_ref() == Some(group)),
        );
        writeln!(output).unwrap();
        writeln!(
            output,
            "Group {group} ({decisive} decisive, {drawn} drawn)"
        )
        .unwrap();
        write_table(&mut output, table);
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "* top {QUALIFYING_PLACES} advance to the knockout stage"
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

pub fn format_standings_json(standings: &Standings) -> Result<String> {
    Ok(serde_json::to_string_pretty(standings)?)
}

// ========== Public Interface ==========

/// Keeps only `group`, failing if it has no table.
pub fn only_group(standings: Standings, group: &str) -> Result<Standings> {
    let id = GroupId::new(group).context("invalid group name")?;
    let Some(table) = standings.get(&id).cloned() else {
        bail!("no standings for group {id}");
    };
    Ok(Standings::from([(id, table)]))
}

/// Runs the standings command.
pub fn run(source: &Source, group: Option<&str>, json: bool) -> Result<()> {
    let board = load_board(source)?;
    let standings = match group {
        Some(group) => only_group(board.standings.clone(), group)?,
        None => board.standings.clone(),
    };

    if json {
        println!("{}", format_standings_json(&standings)?);
    } else {
        let matches: Vec<Match> = board.matches.iter().map(|m| m.fixture.clone()).collect();
        print!("{}", format_standings(board.date, &standings, &matches));
    }

    Ok(())
}
