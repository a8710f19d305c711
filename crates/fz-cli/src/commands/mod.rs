//! CLI subcommand implementations.

pub mod bracket;
pub mod briefing;
pub mod chat;
pub mod date;
pub mod matches;
pub mod standings;
pub mod stays;
pub mod status;
pub mod util;
