//! Stays command: a fan's hotel timeline on the simulated date.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::NaiveDate;
use fz_core::venue::hotel;
use fz_core::{Hotel, HotelStay, StayPhase, StayResolution, resolve};
use serde::Serialize;

use crate::Source;

/// One timeline row with the hotel resolved.
#[derive(Debug, Clone, Serialize)]
pub struct StayEntry {
    pub hotel_id: u32,
    pub hotel: Option<String>,
    pub city: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub phase: StayPhase,
}

/// JSON output structure.
#[derive(Debug, Serialize)]
pub struct JsonStays {
    pub fan_id: u32,
    pub date: NaiveDate,
    pub active: Option<StayEntry>,
    pub stays: Vec<StayEntry>,
}

fn entry(stay: &HotelStay, phase: StayPhase, hotels: &[Hotel]) -> StayEntry {
    let found = hotel(hotels, stay.hotel_id);
    StayEntry {
        hotel_id: stay.hotel_id,
        hotel: found.map(|h| h.name.clone()),
        city: found.map(|h| h.city.clone()),
        check_in: stay.check_in,
        check_out: stay.check_out,
        nights: stay.nights(),
        phase,
    }
}

/// Timeline rows in check-in order.
pub fn stay_entries(resolution: &StayResolution, hotels: &[Hotel]) -> Vec<StayEntry> {
    resolution
        .entries()
        .map(|(stay, phase)| entry(stay, phase, hotels))
        .collect()
}

// ========== Human-Readable Output ==========

pub fn format_stays(fan_id: u32, resolution: &StayResolution, hotels: &[Hotel]) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "HOTEL STAYS for fan {fan_id} (simulated date {})",
        resolution.date
    )
    .unwrap();
    writeln!(output).unwrap();

    if resolution.timeline.is_empty() {
        writeln!(output, "No hotel bookings.").unwrap();
        return output;
    }

    for row in stay_entries(resolution, hotels) {
        let name = row
            .hotel
            .unwrap_or_else(|| format!("Hotel #{}", row.hotel_id));
        let city = row.city.unwrap_or_else(|| "unknown city".to_string());
        writeln!(
            output,
            "{:<9}  {} to {}  {name}, {city} ({} nights)",
            row.phase.to_string(),
            row.check_in,
            row.check_out,
            row.nights
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    match &resolution.active {
        Some(active) => {
            let name = hotel(hotels, active.hotel_id)
                .map_or_else(|| format!("Hotel #{}", active.hotel_id), |h| h.name.clone());
            writeln!(
                output,
                "Currently staying at {name}, checking out in {} days.",
                active.days_left(resolution.date)
            )
            .unwrap();
        }
        None => writeln!(output, "No active stay.").unwrap(),
    }

    output
}

// ========== JSON Output ==========

pub fn format_stays_json(
    fan_id: u32,
    resolution: &StayResolution,
    hotels: &[Hotel],
) -> Result<String> {
    let json = JsonStays {
        fan_id,
        date: resolution.date,
        active: resolution
            .active
            .as_ref()
            .map(|stay| entry(stay, StayPhase::Active, hotels)),
        stays: stay_entries(resolution, hotels),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

/// Runs the stays command.
pub fn run(source: &Source, fan_id: u32, json: bool) -> Result<()> {
    let date = source.current_date()?;
    let resolution = resolve(&source.hotel_bookings(fan_id)?, date);
    let hotels = source.hotels()?;

    if json {
        println!("{}", format_stays_json(fan_id, &resolution, &hotels)?);
    } else {
        print!("{}", format_stays(fan_id, &resolution, &hotels));
    }

    Ok(())
}
