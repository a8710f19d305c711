//! Fan dashboard CLI library.
//!
//! This crate provides the `fz` command-line interface on top of the core
//! engine, the local fixture store and the data service client.

mod cli;
pub mod commands;
mod config;
pub mod source;

pub use cli::{Cli, Commands, DateAction};
pub use config::Config;
pub use source::Source;
