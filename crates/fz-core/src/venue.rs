//! Hotels and stadiums, used to label bookings and matches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stadium {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub city: String,
}

/// Finds a hotel by id.
pub fn hotel(hotels: &[Hotel], id: u32) -> Option<&Hotel> {
    hotels.iter().find(|h| h.id == id)
}

/// Finds a stadium by id.
pub fn stadium(stadiums: &[Stadium], id: u32) -> Option<&Stadium> {
    stadiums.iter().find(|s| s.id == id)
}
