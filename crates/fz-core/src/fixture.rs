//! Match records as delivered by the data service, and their validated form.
//!
//! Raw [`MatchRecord`]s are lenient: every field is optional so that one bad
//! record never fails a whole fetch. [`Match`] is the validated shape the
//! derived computations work on. Records that fail validation are reported
//! as [`MalformedMatchError`] and left out.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::parse_date;
use crate::types::{GroupId, Stage, TeamName};

/// Placeholder shown for knockout participants that are not known yet.
pub const TBD: &str = "TBD";

/// Window either side of a date used by [`within_week`].
const WEEK_DAYS: i64 = 7;

/// Final score of a concluded match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: u32,
    pub score_b: u32,
}

/// Which side a result favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TeamA,
    TeamB,
    Draw,
}

impl MatchResult {
    pub const fn new(score_a: u32, score_b: u32) -> Self {
        Self { score_a, score_b }
    }

    pub const fn outcome(&self) -> Outcome {
        if self.score_a > self.score_b {
            Outcome::TeamA
        } else if self.score_a < self.score_b {
            Outcome::TeamB
        } else {
            Outcome::Draw
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.score_a, self.score_b)
    }
}

/// A match exactly as the data service sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub team_a: Option<String>,
    #[serde(default)]
    pub team_b: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium_id: Option<u32>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub winner: Option<String>,
}

/// Identifier of a record in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub Option<u32>);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "#{id}"),
            None => write!(f, "#?"),
        }
    }
}

/// A match record that cannot take part in derived computations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedMatchError {
    /// A required field is absent or blank.
    #[error("match {id}: missing {field}")]
    MissingField { id: RecordId, field: &'static str },

    /// The stage is not one of the known tournament stages.
    #[error("match {id}: unknown stage {stage:?}")]
    UnknownStage { id: RecordId, stage: String },

    /// The scheduled date is not a calendar date.
    #[error("match {id}: invalid date {date:?}")]
    InvalidDate { id: RecordId, date: String },
}

/// A validated match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub team_a: TeamName,
    pub team_b: TeamName,
    pub date: NaiveDate,
    /// Kick-off time for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium_id: Option<u32>,
    pub stage: Stage,
    /// Always present for [`Stage::Group`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub winner: Option<String>,
}

impl Match {
    /// Returns true if `name` is a case-insensitive substring of either team.
    pub fn involves(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.team_a.as_str().to_lowercase().contains(&needle)
            || self.team_b.as_str().to_lowercase().contains(&needle)
    }

    /// Returns true if the named team won this match.
    pub fn is_winner(&self, team: &TeamName) -> bool {
        self.winner.as_deref() == Some(team.as_str())
    }
}

impl TryFrom<MatchRecord> for Match {
    type Error = MalformedMatchError;

    fn try_from(record: MatchRecord) -> Result<Self, Self::Error> {
        let id = RecordId(record.id);
        let missing = |field: &'static str| MalformedMatchError::MissingField { id, field };

        let match_id = record.id.ok_or_else(|| missing("id"))?;
        let team_a = record
            .team_a
            .and_then(|name| TeamName::new(name).ok())
            .ok_or_else(|| missing("team_a"))?;
        let team_b = record
            .team_b
            .and_then(|name| TeamName::new(name).ok())
            .ok_or_else(|| missing("team_b"))?;

        let raw_date = record.date.ok_or_else(|| missing("date"))?;
        let date = parse_date(&raw_date)
            .map_err(|_| MalformedMatchError::InvalidDate { id, date: raw_date })?;

        let raw_stage = record.stage.ok_or_else(|| missing("stage"))?;
        let stage: Stage = raw_stage
            .parse()
            .map_err(|_| MalformedMatchError::UnknownStage {
                id,
                stage: raw_stage,
            })?;

        let group = record.group.and_then(|group| GroupId::new(group).ok());
        if stage == Stage::Group && group.is_none() {
            return Err(missing("group"));
        }

        Ok(Self {
            id: match_id,
            team_a,
            team_b,
            date,
            time: record.time,
            stadium_id: record.stadium_id,
            stage,
            group,
            result: record.result,
            winner: record.winner,
        })
    }
}

/// Decodes a JSON array of match records one element at a time.
///
/// Elements that do not even have the record shape are skipped.
pub fn decode_records(values: Vec<serde_json::Value>) -> Vec<MatchRecord> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping undecodable match record");
                None
            }
        })
        .collect()
}

/// Validates every record, keeping the good ones in input order.
pub fn validate_records(records: &[MatchRecord]) -> (Vec<Match>, Vec<MalformedMatchError>) {
    let mut matches = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for record in records {
        match Match::try_from(record.clone()) {
            Ok(m) => matches.push(m),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed match");
                skipped.push(err);
            }
        }
    }
    (matches, skipped)
}

/// Hides what is not yet known on `date`.
///
/// Matches scheduled after `date` lose their result and winner. Knockout
/// matches after `date` also have both participants replaced by [`TBD`].
/// Records whose date does not parse are passed through untouched.
pub fn reveal_for_date(records: &[MatchRecord], date: NaiveDate) -> Vec<MatchRecord> {
    records
        .iter()
        .cloned()
        .map(|mut record| {
            let scheduled = record.date.as_deref().and_then(|d| parse_date(d).ok());
            if scheduled.is_some_and(|scheduled| date < scheduled) {
                record.result = None;
                record.winner = None;
                if record.stage.as_deref().is_some_and(|stage| stage != "group") {
                    record.team_a = Some(TBD.to_string());
                    record.team_b = Some(TBD.to_string());
                }
            }
            record
        })
        .collect()
}

/// Matches scheduled on `date`.
pub fn on_date(matches: &[Match], date: NaiveDate) -> Vec<Match> {
    matches.iter().filter(|m| m.date == date).cloned().collect()
}

/// Matches involving `team`, optionally only those on or after `from`.
pub fn for_team(matches: &[Match], team: &str, from: Option<NaiveDate>) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.involves(team))
        .filter(|m| from.is_none_or(|from| m.date >= from))
        .cloned()
        .collect()
}

/// Matches from a week before `date` up to (excluding) a week after it.
///
/// Near the ends of the calendar the window is clamped to
/// [`NaiveDate::MIN`] and [`NaiveDate::MAX`].
pub fn within_week(matches: &[Match], date: NaiveDate) -> Vec<Match> {
    let window = Duration::days(WEEK_DAYS);
    let start = date.checked_sub_signed(window).unwrap_or(NaiveDate::MIN);
    let end = date.checked_add_signed(window).unwrap_or(NaiveDate::MAX);
    matches
        .iter()
        .filter(|m| start <= m.date && m.date < end)
        .cloned()
        .collect()
}
