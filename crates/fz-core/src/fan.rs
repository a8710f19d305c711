//! Fan profiles as supplied by the data service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fixture::Match;
use crate::stay::HotelStay;

/// A preference value: either a single choice or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Preference {
    Many(Vec<String>),
    One(String),
}

/// A registered fan. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fan {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub team_supported: Option<String>,
    /// Match ids the fan holds tickets for.
    #[serde(default)]
    pub attending_games: Vec<u32>,
    #[serde(default)]
    pub hotel_stays: Vec<HotelStay>,
    #[serde(default)]
    pub preferences: BTreeMap<String, Preference>,
}

impl Fan {
    /// Matches the fan attends, by date. Unknown ids are dropped.
    pub fn attending(&self, matches: &[Match]) -> Vec<Match> {
        let mut attending: Vec<Match> = self
            .attending_games
            .iter()
            .filter_map(|id| matches.iter().find(|m| m.id == *id))
            .cloned()
            .collect();
        attending.sort_by_key(|m| m.date);
        attending
    }

    /// Preferences as `category: a, b.` sentences.
    pub fn preferences_summary(&self) -> String {
        self.preferences
            .iter()
            .map(|(category, value)| match value {
                Preference::Many(values) => format!("{category}: {}.", values.join(", ")),
                Preference::One(value) => format!("{category}: {value}."),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
