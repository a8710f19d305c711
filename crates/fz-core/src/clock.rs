//! The simulated current date.
//!
//! [`SimulatedClock`] is the single owner of "today" for every derived view.
//! It is passed by reference into computations rather than read from a
//! global. Dependents that outlive a single computation can
//! [`subscribe`](SimulatedClock::subscribe) and pick up every committed date.
//!
//! Dates are compared at day granularity. There is no timezone conversion.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Wire and display format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that is not a valid `YYYY-MM-DD` calendar date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date {input:?}: expected a calendar date in YYYY-MM-DD format")]
pub struct InvalidDateError {
    pub input: String,
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate, InvalidDateError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| InvalidDateError {
        input: input.to_string(),
    })
}

/// Single-writer holder of the simulated current date.
#[derive(Debug)]
pub struct SimulatedClock {
    date: NaiveDate,
    subscribers: Vec<Sender<NaiveDate>>,
}

impl SimulatedClock {
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            subscribers: Vec::new(),
        }
    }

    /// A clock starting at the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Returns the last committed date.
    pub const fn get(&self) -> NaiveDate {
        self.date
    }

    /// Parses and commits a new date.
    ///
    /// On error the previous date is kept and no subscriber is notified.
    pub fn set(&mut self, input: &str) -> Result<NaiveDate, InvalidDateError> {
        let date = parse_date(input)?;
        Ok(self.set_date(date))
    }

    /// Commits a new date, then notifies subscribers.
    ///
    /// Returns the committed value.
    pub fn set_date(&mut self, date: NaiveDate) -> NaiveDate {
        self.date = date;
        self.subscribers.retain(|tx| tx.send(date).is_ok());
        tracing::debug!(%date, subscribers = self.subscribers.len(), "simulated date committed");
        self.date
    }

    /// Registers a dependent that wants every committed date.
    pub fn subscribe(&mut self) -> ClockSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        ClockSubscription {
            rx,
            latest: self.date,
        }
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::today()
    }
}

/// Receiving end of clock change notifications.
#[derive(Debug)]
pub struct ClockSubscription {
    rx: Receiver<NaiveDate>,
    latest: NaiveDate,
}

impl ClockSubscription {
    /// Drains pending notifications.
    ///
    /// Returns the newest date if any commit happened since the last poll.
    pub fn poll(&mut self) -> Option<NaiveDate> {
        let mut changed = None;
        loop {
            match self.rx.try_recv() {
                Ok(date) => changed = Some(date),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        if let Some(date) = changed {
            self.latest = date;
        }
        changed
    }

    /// The newest date seen by this subscription.
    pub const fn latest(&self) -> NaiveDate {
        self.latest
    }
}
