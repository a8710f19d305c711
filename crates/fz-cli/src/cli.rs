//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fz_core::Stage;

/// Tournament fan dashboard.
///
/// Every view is computed for the simulated current date, which can be moved
/// forwards and backwards to replay the tournament.
#[derive(Debug, Parser)]
#[command(name = "fz", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the data source, simulated date and match counts.
    Status,

    /// Show or change the simulated current date.
    Date {
        #[command(subcommand)]
        action: Option<DateAction>,
    },

    /// List matches with their status on the simulated date.
    Matches {
        /// Only matches involving this team, from the simulated date on.
        #[arg(long)]
        team: Option<String>,

        /// Only matches on this date.
        #[arg(long, conflicts_with = "week")]
        on: Option<String>,

        /// Only matches within a week of the simulated date.
        #[arg(long)]
        week: bool,

        /// Only matches of this stage (group, `round_of_16`, `quarter_final`,
        /// `semi_final`, final).
        #[arg(long)]
        stage: Option<Stage>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show group standings.
    Standings {
        /// Only this group.
        #[arg(long)]
        group: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the knockout bracket.
    Bracket {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a fan's hotel stays.
    Stays {
        /// Fan ID (defaults to the configured fan).
        #[arg(long)]
        fan: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize a fan's day: stay, matches attended and today's matches.
    Briefing {
        /// Fan ID (defaults to the configured fan).
        #[arg(long)]
        fan: Option<u32>,
    },

    /// Talk to the fan assistant.
    Chat {
        /// Message to send.
        #[arg(required_unless_present_any = ["history", "clear"])]
        message: Option<String>,

        /// Fan ID (defaults to the configured fan).
        #[arg(long)]
        fan: Option<u32>,

        /// Print the conversation history instead of sending a message.
        #[arg(long, conflicts_with_all = ["message", "clear"])]
        history: bool,

        /// Delete the conversation history.
        #[arg(long, conflicts_with = "message")]
        clear: bool,
    },
}

/// Date subcommands.
#[derive(Debug, Subcommand)]
pub enum DateAction {
    /// Move the simulated date.
    Set {
        /// `YYYY-MM-DD`, `today`, `+N` / `-N` days, `N days ago` or `in N days`.
        #[arg(allow_hyphen_values = true)]
        date: String,
    },
}
