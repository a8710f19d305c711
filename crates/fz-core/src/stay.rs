//! Hotel bookings relative to the simulated date.
//!
//! A stay covers the nights from `check_in` up to, but not including,
//! `check_out`: on the checkout day the guest is no longer staying.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One accommodation booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelStay {
    pub hotel_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl HotelStay {
    /// True if the night of `date` is covered by this stay.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Number of nights booked. Zero for inverted bookings.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    /// Days from `date` until checkout.
    pub fn days_left(&self, date: NaiveDate) -> i64 {
        (self.check_out - date).num_days()
    }

    /// Days from `date` until check-in.
    pub fn days_until(&self, date: NaiveDate) -> i64 {
        (self.check_in - date).num_days()
    }
}

/// Where a stay sits on the timeline for a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayPhase {
    Completed,
    Active,
    Upcoming,
}

impl fmt::Display for StayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::Active => "active",
            Self::Upcoming => "upcoming",
        };
        write!(f, "{s}")
    }
}

/// The active stay and the full booking timeline for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayResolution {
    pub date: NaiveDate,
    pub active: Option<HotelStay>,
    pub timeline: Vec<HotelStay>,
    /// Position of `active` in `timeline`.
    #[serde(skip)]
    active_index: Option<usize>,
}

impl StayResolution {
    /// Timeline entries paired with their phase.
    ///
    /// Exactly one entry is active at most, even when bookings repeat or
    /// overlap. A stay that has started but lost to an earlier check-in is
    /// reported as completed.
    pub fn entries(&self) -> impl Iterator<Item = (&HotelStay, StayPhase)> {
        self.timeline
            .iter()
            .enumerate()
            .map(|(index, stay)| (stay, self.phase_at(index, stay)))
    }

    fn phase_at(&self, index: usize, stay: &HotelStay) -> StayPhase {
        if self.active_index == Some(index) {
            StayPhase::Active
        } else if stay.check_out <= self.date || stay.covers(self.date) {
            StayPhase::Completed
        } else {
            StayPhase::Upcoming
        }
    }
}

/// Resolves the active stay for `date` and orders the timeline by check-in.
///
/// Overlapping bookings are not validated. If several stays cover `date`,
/// the earliest by check-in wins.
pub fn resolve(stays: &[HotelStay], date: NaiveDate) -> StayResolution {
    let mut timeline = stays.to_vec();
    timeline.sort_by_key(|stay| stay.check_in);
    let active_index = timeline.iter().position(|stay| stay.covers(date));
    StayResolution {
        date,
        active: active_index.and_then(|index| timeline.get(index)).cloned(),
        timeline,
        active_index,
    }
}

/// The earliest stay that starts after `date`.
pub fn next_stay(stays: &[HotelStay], date: NaiveDate) -> Option<&HotelStay> {
    stays
        .iter()
        .filter(|stay| stay.check_in > date)
        .min_by_key(|stay| stay.check_in)
}
