//! Matches command: the classified match list for the simulated date.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use fz_core::classify::classify_all;
use fz_core::fixture::{for_team, on_date, validate_records, within_week};
use fz_core::{ClassifiedMatch, Match, MatchRecord, Stage};

use super::util::{fixture_label, parse_date_arg};
use crate::Source;

/// Narrowing applied to the match list.
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    /// Team name substring; keeps matches from the simulated date on.
    pub team: Option<String>,
    pub on: Option<NaiveDate>,
    pub week: bool,
    pub stage: Option<Stage>,
}

/// Applies every filter, preserving input order.
pub fn select(matches: &[Match], date: NaiveDate, filter: &MatchFilter) -> Vec<Match> {
    let mut selected = matches.to_vec();
    if let Some(team) = &filter.team {
        selected = for_team(&selected, team, Some(date));
    }
    if let Some(day) = filter.on {
        selected = on_date(&selected, day);
    }
    if filter.week {
        selected = within_week(&selected, date);
    }
    if let Some(stage) = filter.stage {
        selected.retain(|m| m.stage == stage);
    }
    selected
}

fn stage_label(m: &Match) -> String {
    match (&m.stage, &m.group) {
        (Stage::Group, Some(group)) => format!("Group {group}"),
        (stage, _) => stage.label().to_string(),
    }
}

fn status_label(m: &ClassifiedMatch) -> String {
    if m.is_in_progress() {
        "LIVE".to_string()
    } else {
        m.status.to_string()
    }
}

// ========== Human-Readable Output ==========

/// Format classified matches as a table.
pub fn format_matches(date: NaiveDate, matches: &[ClassifiedMatch]) -> String {
    let mut output = String::new();

    writeln!(output, "MATCHES (simulated date {date})").unwrap();
    writeln!(output).unwrap();

    if matches.is_empty() {
        writeln!(output, "No matches found.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<10}  {:<5}  {:<8}  {:<13}  Match",
        "Date", "Time", "Status", "Stage"
    )
    .unwrap();
    writeln!(
        output,
        "──────────  ─────  ────────  ─────────────  ──────────────────────"
    )
    .unwrap();

    for m in matches {
        writeln!(
            output,
            "{:<10}  {:<5}  {:<8}  {:<13}  {}",
            m.fixture.date,
            m.fixture.time.as_deref().unwrap_or("--:--"),
            status_label(m),
            stage_label(&m.fixture),
            fixture_label(&m.fixture)
        )
        .unwrap();
    }

    output
}

// ========== JSON Output ==========

pub fn format_matches_json(matches: &[ClassifiedMatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}

// ========== Public Interface ==========

/// Raw filter arguments as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct MatchArgs {
    pub team: Option<String>,
    pub on: Option<String>,
    pub week: bool,
    pub stage: Option<Stage>,
}

/// Fetches the narrowest record set the filter allows.
///
/// A team filter wins over a day filter; [`select`] applies the rest.
pub fn fetch(source: &Source, date: NaiveDate, filter: &MatchFilter) -> Result<Vec<MatchRecord>> {
    match (&filter.team, filter.on) {
        (Some(team), _) => source.team_matches(team, date),
        (None, Some(day)) => source.matches_on(day, date),
        (None, None) => source.matches(),
    }
}

/// Runs the matches command.
pub fn run(source: &Source, args: MatchArgs, json: bool) -> Result<()> {
    let date = source.current_date()?;
    let on = args
        .on
        .as_deref()
        .map(|input| parse_date_arg(input, date, Local::now().date_naive()))
        .transpose()?;
    let filter = MatchFilter {
        team: args.team,
        on,
        week: args.week,
        stage: args.stage,
    };

    let (matches, skipped) = validate_records(&fetch(source, date, &filter)?);
    if !skipped.is_empty() {
        tracing::warn!(skipped = skipped.len(), "some match records were skipped");
    }
    let classified = classify_all(&select(&matches, date, &filter), date);

    if json {
        println!("{}", format_matches_json(&classified)?);
    } else {
        print!("{}", format_matches(date, &classified));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use fz_core::{MatchResult, parse_date};
    use insta::assert_snapshot;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn sample() -> Vec<Match> {
        let record = |id: u32,
                      day: &str,
                      stage: &str,
                      teams: (&str, &str),
                      result: Option<(u32, u32)>| MatchRecord {
            id: Some(id),
            team_a: Some(teams.0.to_string()),
            team_b: Some(teams.1.to_string()),
            date: Some(day.to_string()),
            time: (id != 4).then(|| "18:00".to_string()),
            stage: Some(stage.to_string()),
            group: (stage == "group").then(|| "A".to_string()),
            result: result.map(|(a, b)| MatchResult::new(a, b)),
            ..MatchRecord::default()
        };
        validate_records(&[
            record(1, "2034-06-10", "group", ("Saudi Arabia", "Japan"), Some((3, 1))),
            record(2, "2034-06-15", "group", ("Brazil", "Ghana"), None),
            record(3, "2034-06-15", "group", ("Peru", "Japan"), Some((0, 0))),
            record(4, "2034-06-30", "round_of_16", ("TBD", "TBD"), None),
        ])
        .0
    }

    fn ids(matches: &[Match]) -> Vec<u32> {
        matches.iter().map(|m| m.id).collect()
    }

    #[test]
    fn team_filter_keeps_matches_from_simulated_date() {
        let filter = MatchFilter {
            team: Some("japan".to_string()),
            ..MatchFilter::default()
        };
        assert_eq!(ids(&select(&sample(), date("2034-06-15"), &filter)), vec![3]);
        assert_eq!(
            ids(&select(&sample(), date("2034-06-01"), &filter)),
            vec![1, 3]
        );
    }

    #[test]
    fn week_window_is_half_open() {
        let filter = MatchFilter {
            week: true,
            ..MatchFilter::default()
        };
        assert_eq!(
            ids(&select(&sample(), date("2034-06-17"), &filter)),
            vec![1, 2, 3]
        );
        assert!(select(&sample(), date("2034-06-23"), &filter).is_empty());
        assert_eq!(ids(&select(&sample(), date("2034-06-24"), &filter)), vec![4]);
    }

    #[test]
    fn stage_and_day_filters_combine() {
        let filter = MatchFilter {
            on: Some(date("2034-06-15")),
            stage: Some(Stage::Group),
            ..MatchFilter::default()
        };
        assert_eq!(ids(&select(&sample(), date("2034-06-01"), &filter)), vec![2, 3]);

        let knockout = MatchFilter {
            stage: Some(Stage::RoundOf16),
            ..MatchFilter::default()
        };
        assert_eq!(ids(&select(&sample(), date("2034-06-01"), &knockout)), vec![4]);
    }

    #[test]
    fn format_matches_marks_in_progress() {
        let today = date("2034-06-15");
        let classified = classify_all(&sample(), today);

        assert_snapshot!(format_matches(today, &classified), @r"
        MATCHES (simulated date 2034-06-15)

        Date        Time   Status    Stage          Match
        ──────────  ─────  ────────  ─────────────  ──────────────────────
        2034-06-10  18:00  past      Group A        Saudi Arabia 3 - 1 Japan
        2034-06-15  18:00  LIVE      Group A        Brazil vs Ghana
        2034-06-15  18:00  live      Group A        Peru 0 - 0 Japan
        2034-06-30  --:--  upcoming  Round of 16    TBD vs TBD
        ");
    }

    #[test]
    fn format_matches_empty() {
        let output = format_matches(date("2034-06-15"), &[]);
        assert!(output.contains("No matches found."));
    }

    #[test]
    fn json_output_flattens_status() {
        let classified = classify_all(&sample()[..1], date("2034-06-15"));
        let json: serde_json::Value =
            serde_json::from_str(&format_matches_json(&classified).unwrap()).unwrap();
        assert_eq!(json[0]["status"], "past");
        assert_eq!(json[0]["team_a"], "Saudi Arabia");
        assert_eq!(json[0]["result"]["score_a"], 3);
    }

    #[test]
    fn fetch_narrows_by_team_then_day() {
        let temp = tempfile::tempdir().unwrap();
        let games = serde_json::json!([
            {"id": 1, "team_a": "Saudi Arabia", "team_b": "Japan", "date": "2034-06-10",
             "stage": "group", "group": "A"},
            {"id": 2, "team_a": "Brazil", "team_b": "Japan", "date": "2034-06-15",
             "stage": "group", "group": "A"},
            {"id": 3, "team_a": "Peru", "team_b": "Ghana", "date": "2034-06-15",
             "stage": "group", "group": "B"}
        ]);
        std::fs::write(temp.path().join("games.json"), games.to_string()).unwrap();
        let source = Source::local(temp.path()).unwrap();
        let today = date("2034-06-12");
        let fetched = |filter: &MatchFilter| -> Vec<Option<u32>> {
            fetch(&source, today, filter)
                .unwrap()
                .iter()
                .map(|m| m.id)
                .collect()
        };

        let team = MatchFilter {
            team: Some("JAPAN".to_string()),
            on: Some(date("2034-06-10")),
            ..MatchFilter::default()
        };
        assert_eq!(fetched(&team), vec![Some(2)]);

        let day = MatchFilter {
            on: Some(date("2034-06-15")),
            ..MatchFilter::default()
        };
        assert_eq!(fetched(&day), vec![Some(2), Some(3)]);
        assert_eq!(fetched(&MatchFilter::default()).len(), 3);
    }
}
