//! Temporal state of a match relative to the simulated date.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fixture::Match;

/// Where a match sits relative to the simulated current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Past,
    Live,
    Upcoming,
}

impl MatchStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Live => "live",
            Self::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a match against the clock date.
///
/// A match on the clock date is live whether or not its result has been
/// recorded, so same-day results can be revealed while the match still reads
/// as today's. Only the calendar date is consulted; kick-off time is ignored.
pub fn classify(m: &Match, clock_date: NaiveDate) -> MatchStatus {
    if m.date == clock_date {
        MatchStatus::Live
    } else if m.date < clock_date {
        MatchStatus::Past
    } else {
        MatchStatus::Upcoming
    }
}

/// A match paired with its status for one clock date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedMatch {
    #[serde(flatten)]
    pub fixture: Match,
    pub status: MatchStatus,
}

impl ClassifiedMatch {
    /// Live and still without a result.
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.status, MatchStatus::Live) && self.fixture.result.is_none()
    }
}

/// Classifies every match, preserving input order.
pub fn classify_all(matches: &[Match], clock_date: NaiveDate) -> Vec<ClassifiedMatch> {
    matches
        .iter()
        .map(|m| ClassifiedMatch {
            fixture: m.clone(),
            status: classify(m, clock_date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_date;
    use crate::fixture::MatchResult;
    use crate::types::{Stage, TeamName};

    fn fixture(id: u32, date: &str, result: Option<MatchResult>) -> Match {
        Match {
            id,
            team_a: TeamName::new("Team1").unwrap(),
            team_b: TeamName::new("Team2").unwrap(),
            date: parse_date(date).unwrap(),
            time: Some("21:00".to_string()),
            stadium_id: None,
            stage: Stage::RoundOf16,
            group: None,
            result,
            winner: None,
        }
    }

    #[test]
    fn classifies_past_live_and_upcoming_around_clock() {
        let clock = parse_date("2034-06-15").unwrap();

        let today = fixture(1, "2034-06-15", None);
        let earlier = fixture(2, "2034-06-10", Some(MatchResult::new(1, 0)));
        let later = fixture(3, "2034-06-20", None);

        assert_eq!(classify(&today, clock), MatchStatus::Live);
        assert_eq!(classify(&earlier, clock), MatchStatus::Past);
        assert_eq!(classify(&later, clock), MatchStatus::Upcoming);
    }

    #[test]
    fn same_day_match_with_result_is_still_live() {
        let clock = parse_date("2034-06-15").unwrap();
        let decided = fixture(1, "2034-06-15", Some(MatchResult::new(2, 2)));
        assert_eq!(classify(&decided, clock), MatchStatus::Live);

        let classified = classify_all(&[decided], clock);
        assert!(!classified[0].is_in_progress());
    }

    #[test]
    fn past_match_without_result_is_past() {
        let clock = parse_date("2034-06-15").unwrap();
        assert_eq!(
            classify(&fixture(1, "2034-06-14", None), clock),
            MatchStatus::Past
        );
    }

    #[test]
    fn classification_ignores_order_and_duplicates() {
        let clock = parse_date("2034-06-15").unwrap();
        let matches = vec![
            fixture(1, "2034-06-14", None),
            fixture(2, "2034-06-15", None),
            fixture(3, "2034-06-16", None),
        ];
        let forward = classify_all(&matches, clock);

        let mut shuffled = matches.clone();
        shuffled.reverse();
        shuffled.push(matches[1].clone());
        let again = classify_all(&shuffled, clock);

        for item in &again {
            let original = forward
                .iter()
                .find(|c| c.fixture.id == item.fixture.id)
                .unwrap();
            assert_eq!(original.status, item.status);
        }
        assert_eq!(classify_all(&matches, clock), forward);
    }

    #[test]
    fn classified_match_serializes_flat() {
        let clock = parse_date("2034-06-15").unwrap();
        let classified = classify_all(&[fixture(9, "2034-06-15", None)], clock);
        let json = serde_json::to_value(&classified[0]).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["status"], "live");
        assert_eq!(json["stage"], "round_of_16");
    }
}
