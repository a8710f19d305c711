//! The full derived view for one simulated date.
//!
//! `(clock date, raw records) -> MatchBoard` is the whole pipeline: records
//! are validated, classified, aggregated into standings and partitioned into
//! the bracket. Nothing is cached between builds.

use chrono::NaiveDate;
use serde::Serialize;

use crate::bracket::{Bracket, assemble};
use crate::classify::{ClassifiedMatch, MatchStatus, classify_all};
use crate::fixture::{MalformedMatchError, Match, MatchRecord, validate_records};
use crate::standings::{Standings, aggregate};

/// Everything the match views render for one date.
#[derive(Debug, Clone, Serialize)]
pub struct MatchBoard {
    pub date: NaiveDate,
    pub matches: Vec<ClassifiedMatch>,
    pub standings: Standings,
    pub bracket: Bracket,
    /// Records left out because they failed validation.
    #[serde(skip)]
    pub skipped: Vec<MalformedMatchError>,
}

impl MatchBoard {
    /// Builds the board from raw records, skipping malformed ones.
    pub fn build(date: NaiveDate, records: &[MatchRecord]) -> Self {
        let (matches, skipped) = validate_records(records);
        Self::from_matches(date, &matches, skipped)
    }

    pub fn from_matches(
        date: NaiveDate,
        matches: &[Match],
        skipped: Vec<MalformedMatchError>,
    ) -> Self {
        let board = Self {
            date,
            matches: classify_all(matches, date),
            standings: aggregate(matches),
            bracket: assemble(matches),
            skipped,
        };
        tracing::debug!(
            %date,
            matches = board.matches.len(),
            groups = board.standings.len(),
            skipped = board.skipped.len(),
            "match board built"
        );
        board
    }

    /// Matches with the given status, in input order.
    pub fn with_status(&self, status: MatchStatus) -> impl Iterator<Item = &ClassifiedMatch> {
        self.matches.iter().filter(move |m| m.status == status)
    }

    /// Number of matches that have a recorded result.
    pub fn decided(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.fixture.result.is_some())
            .count()
    }
}
