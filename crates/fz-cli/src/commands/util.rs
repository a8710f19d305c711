//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, bail};
use chrono::{Duration, NaiveDate};
use fz_core::{Match, MatchBoard, parse_date};
use regex::Regex;

use crate::{Config, Source};

/// Pre-compiled regexes for relative date parsing.
static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([+-])(\d+)$").unwrap());
static DAYS_AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+days?\s+ago$").unwrap());
static IN_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^in\s+(\d+)\s+days?$").unwrap());

/// Conservative bound for relative offsets (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Parse a date argument as an absolute date or an offset from `simulated`.
///
/// Supports:
/// - Absolute: "2034-06-15"
/// - The real calendar date: "today"
/// - Offsets from the simulated date: "+3", "-2", "3 days ago", "in 2 days"
pub fn parse_date_arg(
    input: &str,
    simulated: NaiveDate,
    today: NaiveDate,
) -> anyhow::Result<NaiveDate> {
    let s = input.trim().to_lowercase();
    if s == "today" {
        return Ok(today);
    }

    let offset = if let Some(caps) = OFFSET_RE.captures(&s) {
        let n = parse_days(&caps[2])?;
        if &caps[1] == "-" { -n } else { n }
    } else if let Some(caps) = DAYS_AGO_RE.captures(&s) {
        -parse_days(&caps[1])?
    } else if let Some(caps) = IN_DAYS_RE.captures(&s) {
        parse_days(&caps[1])?
    } else {
        return parse_date(&s).with_context(|| {
            format!(
                "Invalid date: {input}. Use YYYY-MM-DD (e.g., 2034-06-15), 'today', or an offset (e.g., '+3', '2 days ago')"
            )
        });
    };

    simulated
        .checked_add_signed(Duration::days(offset))
        .with_context(|| format!("date offset out of range: {input}"))
}

fn parse_days(digits: &str) -> anyhow::Result<i64> {
    let n: i64 = digits
        .parse()
        .context("failed to parse number in relative date")?;
    if n > MAX_RELATIVE_DAYS {
        bail!("Relative date value too large: {n} days");
    }
    Ok(n)
}

/// The fan to act for: the explicit `--fan`, else the configured default.
pub fn resolve_fan(arg: Option<u32>, config: &Config) -> anyhow::Result<u32> {
    arg.or(config.fan_id)
        .context("no fan given; pass --fan <ID> or set fan_id in the config")
}

/// Builds the match board for the source's simulated date.
pub fn load_board(source: &Source) -> anyhow::Result<MatchBoard> {
    let date = source.current_date()?;
    let board = MatchBoard::build(date, &source.matches()?);
    if !board.skipped.is_empty() {
        tracing::warn!(skipped = board.skipped.len(), "some match records were skipped");
    }
    Ok(board)
}

/// "Team A vs Team B", with the score once known.
pub fn fixture_label(m: &Match) -> String {
    m.result.map_or_else(
        || format!("{} vs {}", m.team_a, m.team_b),
        |result| format!("{} {} {}", m.team_a, result, m.team_b),
    )
}
