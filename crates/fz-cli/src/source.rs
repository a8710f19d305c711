//! Where the dashboard reads its data from.
//!
//! Either the REST data service, driven synchronously through a
//! current-thread runtime, or a local fixture directory.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use fz_api::{ChatMessage, Client};
use fz_core::clock::DATE_FORMAT;
use fz_core::fixture::reveal_for_date;
use fz_core::{Fan, Hotel, HotelStay, MatchRecord, Stadium};
use fz_data::FixtureStore;
use tokio::runtime::Runtime;

use crate::Config;

/// The data source selected by configuration.
pub enum Source {
    Remote { client: Client, runtime: Runtime },
    Local(FixtureStore),
}

impl Source {
    /// Opens the fixture store if `data_dir` is configured, else the service client.
    pub fn open(config: &Config) -> Result<Self> {
        if let Some(dir) = &config.data_dir {
            return Self::local(dir);
        }

        let client = Client::new(config.api_url.clone(), config.timeout())
            .context("failed to create data service client")?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        tracing::debug!(url = client.base_url(), "using data service");
        Ok(Self::Remote { client, runtime })
    }

    pub fn local(dir: &Path) -> Result<Self> {
        let store = FixtureStore::open(dir)
            .with_context(|| format!("failed to load fixtures from {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "using fixture store");
        Ok(Self::Local(store))
    }

    /// Human-readable description for status output.
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { client, .. } => format!("data service at {}", client.base_url()),
            Self::Local(_) => "local fixtures".to_string(),
        }
    }

    pub fn current_date(&self) -> Result<NaiveDate> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.current_date())
                .context("failed to fetch simulated date"),
            Self::Local(store) => Ok(store.current_date()),
        }
    }

    /// Stores a new simulated date and returns the value the source committed.
    pub fn set_current_date(&mut self, date: NaiveDate) -> Result<NaiveDate> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.set_current_date(date))
                .context("failed to update simulated date"),
            Self::Local(store) => store
                .set_current_date(&date.format(DATE_FORMAT).to_string())
                .context("failed to update simulated date"),
        }
    }

    /// All match records as the source reveals them for its current date.
    pub fn matches(&self) -> Result<Vec<MatchRecord>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.matches())
                .context("failed to fetch matches"),
            Self::Local(store) => Ok(store.matches()),
        }
    }

    /// Records scheduled on `day`, revealed as of the simulated `date`.
    pub fn matches_on(&self, day: NaiveDate, date: NaiveDate) -> Result<Vec<MatchRecord>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.matches_on(day))
                .map(|records| reveal_for_date(&records, date))
                .with_context(|| format!("failed to fetch matches on {day}")),
            Self::Local(store) => Ok(store.matches_on(day)),
        }
    }

    /// Records of `team` from the simulated `date` on, revealed as of `date`.
    pub fn team_matches(&self, team: &str, date: NaiveDate) -> Result<Vec<MatchRecord>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.team_matches(team, date))
                .map(|records| reveal_for_date(&records, date))
                .with_context(|| format!("failed to fetch matches for {team}")),
            Self::Local(store) => Ok(store.team_matches(team, date)),
        }
    }

    pub fn fan(&self, id: u32) -> Result<Fan> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.fan(id))
                .with_context(|| format!("failed to fetch fan {id}")),
            Self::Local(store) => Ok(store.fan(id)?.clone()),
        }
    }

    pub fn hotel_bookings(&self, fan_id: u32) -> Result<Vec<HotelStay>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.hotel_bookings(fan_id))
                .with_context(|| format!("failed to fetch hotel bookings for fan {fan_id}")),
            Self::Local(store) => Ok(store.hotel_bookings(fan_id)?),
        }
    }

    pub fn hotels(&self) -> Result<Vec<Hotel>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.hotels())
                .context("failed to fetch hotels"),
            Self::Local(store) => Ok(store.hotels().to_vec()),
        }
    }

    pub fn stadiums(&self) -> Result<Vec<Stadium>> {
        match self {
            Self::Remote { client, runtime } => runtime
                .block_on(client.stadiums())
                .context("failed to fetch stadiums"),
            Self::Local(store) => Ok(store.stadiums().to_vec()),
        }
    }

    pub fn chat(&self, fan_id: u32, message: &str) -> Result<String> {
        let (client, runtime) = self.remote("chat")?;
        runtime
            .block_on(client.chat(fan_id, message))
            .context("assistant request failed")
    }

    pub fn chat_history(&self, fan_id: u32) -> Result<Vec<ChatMessage>> {
        let (client, runtime) = self.remote("chat history")?;
        runtime
            .block_on(client.chat_history(fan_id))
            .context("failed to fetch chat history")
    }

    pub fn clear_chat_history(&self, fan_id: u32) -> Result<()> {
        let (client, runtime) = self.remote("chat history")?;
        runtime
            .block_on(client.clear_chat_history(fan_id))
            .context("failed to delete chat history")
    }

    fn remote(&self, feature: &str) -> Result<(&Client, &Runtime)> {
        match self {
            Self::Remote { client, runtime } => Ok((client, runtime)),
            Self::Local(_) => bail!("{feature} needs the data service; unset data_dir to use it"),
        }
    }
}
