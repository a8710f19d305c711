//! A fan's day at a glance: where they are staying, what they are attending,
//! and what is on today.
//!
//! This is the context handed to the assistant alongside a chat message, and
//! it is also printed directly by the CLI.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::{MatchStatus, classify};
use crate::fan::Fan;
use crate::fixture::{Match, on_date};
use crate::stay::{HotelStay, next_stay, resolve};
use crate::venue::{Hotel, Stadium, hotel, stadium};

const UNKNOWN_STADIUM: &str = "Unknown stadium";

/// Where the fan is sleeping relative to the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StayNote {
    Staying { hotel: String, city: String, days_left: i64 },
    Upcoming { hotel: String, city: String, days_until: i64 },
    None,
}

impl fmt::Display for StayNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staying {
                hotel,
                city,
                days_left,
            } => write!(f, "{hotel} in {city} (checking out in {days_left} days)"),
            Self::Upcoming {
                hotel,
                city,
                days_until,
            } => write!(f, "Upcoming stay at {hotel} in {city} in {days_until} days"),
            Self::None => write!(f, "No current hotel stay found"),
        }
    }
}

/// Everything known about a fan's situation on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FanBriefing {
    pub date: NaiveDate,
    pub fan_name: String,
    pub nationality: String,
    pub team_supported: String,
    pub stay: StayNote,
    pub itinerary: Vec<String>,
    pub attending: Vec<String>,
    pub today: Vec<String>,
    pub preferences: String,
}

impl FanBriefing {
    pub fn build(
        fan: &Fan,
        date: NaiveDate,
        matches: &[Match],
        hotels: &[Hotel],
        stadiums: &[Stadium],
    ) -> Self {
        let stadium_name = |m: &Match| {
            m.stadium_id
                .and_then(|id| stadium(stadiums, id))
                .map_or(UNKNOWN_STADIUM, |s| s.name.as_str())
                .to_string()
        };

        let attending = fan
            .attending(matches)
            .iter()
            .map(|m| {
                let status = match classify(m, date) {
                    MatchStatus::Past => "Past",
                    MatchStatus::Live => "Today's",
                    MatchStatus::Upcoming => "Upcoming",
                };
                format!(
                    "{status} match on {}: {} vs {} at {}",
                    m.date,
                    m.team_a,
                    m.team_b,
                    stadium_name(m)
                )
            })
            .collect();

        let today = on_date(matches, date)
            .iter()
            .map(|m| {
                let mut line = format!("{} vs {} at {}", m.team_a, m.team_b, stadium_name(m));
                if let Some(time) = &m.time {
                    line.push_str(", ");
                    line.push_str(time);
                }
                line
            })
            .collect();

        let resolution = resolve(&fan.hotel_stays, date);
        let itinerary = resolution
            .timeline
            .iter()
            .map(|s| {
                let (name, city) = hotel_label(hotels, s);
                format!("{name} in {city} from {} to {}", s.check_in, s.check_out)
            })
            .collect();

        Self {
            date,
            fan_name: fan.name.clone(),
            nationality: fan.nationality.clone().unwrap_or_default(),
            team_supported: fan.team_supported.clone().unwrap_or_default(),
            stay: stay_note(fan, date, hotels),
            itinerary,
            attending,
            today,
            preferences: fan.preferences_summary(),
        }
    }
}

fn stay_note(fan: &Fan, date: NaiveDate, hotels: &[Hotel]) -> StayNote {
    if let Some(active) = resolve(&fan.hotel_stays, date).active {
        let (hotel, city) = hotel_label(hotels, &active);
        return StayNote::Staying {
            hotel,
            city,
            days_left: active.days_left(date),
        };
    }
    if let Some(next) = next_stay(&fan.hotel_stays, date) {
        let (hotel, city) = hotel_label(hotels, next);
        return StayNote::Upcoming {
            hotel,
            city,
            days_until: next.days_until(date),
        };
    }
    StayNote::None
}

fn hotel_label(hotels: &[Hotel], stay: &HotelStay) -> (String, String) {
    hotel(hotels, stay.hotel_id).map_or_else(
        || (format!("Hotel #{}", stay.hotel_id), "unknown city".to_string()),
        |h| (h.name.clone(), h.city.clone()),
    )
}

fn or_none(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join("; ")
    }
}

impl fmt::Display for FanBriefing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Date: {}", self.date)?;
        write!(f, "Fan: {}", self.fan_name)?;
        if !self.nationality.is_empty() {
            write!(f, " ({})", self.nationality)?;
        }
        if !self.team_supported.is_empty() {
            write!(f, ", supporting {}", self.team_supported)?;
        }
        writeln!(f)?;
        writeln!(f, "Current stay: {}", self.stay)?;
        writeln!(
            f,
            "Itinerary: {}",
            or_none(&self.itinerary, "No hotel bookings")
        )?;
        writeln!(f, "Attending: {}", or_none(&self.attending, "No games found"))?;
        writeln!(
            f,
            "Today: {}",
            or_none(&self.today, "No games scheduled for today")
        )?;
        if !self.preferences.is_empty() {
            writeln!(f, "Preferences: {}", self.preferences)?;
        }
        Ok(())
    }
}
