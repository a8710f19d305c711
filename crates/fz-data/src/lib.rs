//! Local fixture store for the fan dashboard.
//!
//! Answers the same questions as the REST data service from a directory of
//! JSON files, so the dashboard works offline:
//!
//! | File             | Contents            |
//! |------------------|---------------------|
//! | `games.json`     | `[MatchRecord]`     |
//! | `fans.json`      | `[Fan]`             |
//! | `hotels.json`    | `[Hotel]`           |
//! | `stadiums.json`  | `[Stadium]`         |
//! | `date.json`      | `{"date": "..."}`   |
//!
//! A missing file is treated as empty. `date.json` is the store's own
//! record of the simulated date and is rewritten by
//! [`FixtureStore::set_current_date`]; without it the store starts at the
//! local calendar date.
//!
//! # Result masking
//!
//! Like the service, the store never reveals more than is known on its
//! current date: [`FixtureStore::matches`] hides results after that date and
//! knockout participants that are not yet decided.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use fz_core::clock::{DATE_FORMAT, parse_date};
use fz_core::fixture::{decode_records, reveal_for_date};
use fz_core::{Fan, Hotel, HotelStay, InvalidDateError, MatchRecord, Stadium};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GAMES_FILE: &str = "games.json";
const FANS_FILE: &str = "fans.json";
const HOTELS_FILE: &str = "hotels.json";
const STADIUMS_FILE: &str = "stadiums.json";
const DATE_FILE: &str = "date.json";

/// Fixture store errors.
#[derive(Debug, Error)]
pub enum DataError {
    /// A fixture file exists but could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A fixture file is not valid JSON of the expected shape.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The requested simulated date is not a calendar date.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    /// No fan with this id.
    #[error("fan {0} not found")]
    FanNotFound(u32),
}

#[derive(Debug, Serialize, Deserialize)]
struct DatePayload {
    date: String,
}

/// Fixture data loaded from one directory.
#[derive(Debug)]
pub struct FixtureStore {
    dir: PathBuf,
    date: NaiveDate,
    games: Vec<MatchRecord>,
    fans: Vec<Fan>,
    hotels: Vec<Hotel>,
    stadiums: Vec<Stadium>,
}

impl FixtureStore {
    /// Loads every fixture file from `dir`.
    pub fn open(dir: &Path) -> Result<Self, DataError> {
        let games = decode_records(load_list(&dir.join(GAMES_FILE))?);
        let fans = load_list(&dir.join(FANS_FILE))?;
        let hotels = load_list(&dir.join(HOTELS_FILE))?;
        let stadiums = load_list(&dir.join(STADIUMS_FILE))?;
        let date = load_date(&dir.join(DATE_FILE))?.unwrap_or_else(|| Local::now().date_naive());

        tracing::debug!(
            dir = %dir.display(),
            %date,
            games = games.len(),
            fans = fans.len(),
            "fixture store loaded"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            date,
            games,
            fans,
            hotels,
            stadiums,
        })
    }

    /// The store's simulated date.
    pub const fn current_date(&self) -> NaiveDate {
        self.date
    }

    /// Validates and stores a new simulated date.
    ///
    /// The previous date is kept if validation or the write fails.
    pub fn set_current_date(&mut self, input: &str) -> Result<NaiveDate, DataError> {
        let date = parse_date(input)?;
        let path = self.dir.join(DATE_FILE);
        let payload = DatePayload {
            date: date.format(DATE_FORMAT).to_string(),
        };
        let json = serde_json::to_string_pretty(&payload).map_err(|source| DataError::Json {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| DataError::Io { path, source })?;
        self.date = date;
        Ok(date)
    }

    /// All match records, masked for the current date.
    pub fn matches(&self) -> Vec<MatchRecord> {
        reveal_for_date(&self.games, self.date)
    }

    /// Masked records scheduled on `day`.
    pub fn matches_on(&self, day: NaiveDate) -> Vec<MatchRecord> {
        self.matches()
            .into_iter()
            .filter(|record| record_date(record) == Some(day))
            .collect()
    }

    /// Masked records whose team names contain `team` (ignoring case),
    /// dated `from` or later.
    pub fn team_matches(&self, team: &str, from: NaiveDate) -> Vec<MatchRecord> {
        let needle = team.to_lowercase();
        self.matches()
            .into_iter()
            .filter(|record| record_date(record).is_some_and(|date| date >= from))
            .filter(|record| {
                [&record.team_a, &record.team_b]
                    .into_iter()
                    .flatten()
                    .any(|name| name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn fan(&self, id: u32) -> Result<&Fan, DataError> {
        self.fans
            .iter()
            .find(|f| f.id == id)
            .ok_or(DataError::FanNotFound(id))
    }

    /// The fan's hotel bookings in stored order.
    pub fn hotel_bookings(&self, fan_id: u32) -> Result<Vec<HotelStay>, DataError> {
        Ok(self.fan(fan_id)?.hotel_stays.clone())
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn stadiums(&self) -> &[Stadium] {
        &self.stadiums
    }
}

fn record_date(record: &MatchRecord) -> Option<NaiveDate> {
    record.date.as_deref().and_then(|date| parse_date(date).ok())
}

/// Reads a JSON array, treating a missing file as empty.
fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "fixture file not found, using empty list");
            Ok(Vec::new())
        }
        Err(source) => Err(DataError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn load_date(path: &Path) -> Result<Option<NaiveDate>, DataError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DataError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let payload: DatePayload = serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parse_date(&payload.date)?))
}
