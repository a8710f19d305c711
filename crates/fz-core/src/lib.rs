//! Core domain logic for the fan dashboard.
//!
//! This crate owns the simulated current date and every computation derived
//! from it:
//! - Clock: the single authoritative simulated date
//! - Classification: past / live / upcoming per match
//! - Standings: group tables from match results
//! - Bracket: knockout matches partitioned by round
//! - Stays: the active hotel booking and the booking timeline
//!
//! Everything except the clock is a pure function of its inputs and is
//! recomputed on demand.

pub mod board;
pub mod bracket;
pub mod briefing;
pub mod classify;
pub mod clock;
pub mod fan;
pub mod fixture;
pub mod standings;
pub mod stay;
pub mod types;
pub mod venue;

pub use board::MatchBoard;
pub use bracket::{Bracket, assemble};
pub use briefing::{FanBriefing, StayNote};
pub use classify::{ClassifiedMatch, MatchStatus, classify};
pub use clock::{ClockSubscription, InvalidDateError, SimulatedClock, parse_date};
pub use fan::{Fan, Preference};
pub use fixture::{MalformedMatchError, Match, MatchRecord, MatchResult, Outcome};
pub use standings::{Standings, TeamStat, aggregate};
pub use stay::{HotelStay, StayPhase, StayResolution, resolve};
pub use types::{GroupId, Stage, TeamName, ValidationError};
pub use venue::{Hotel, Stadium};
