use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fz_cli::commands::chat::ChatAction;
use fz_cli::commands::matches::MatchArgs;
use fz_cli::commands::util::resolve_fan;
use fz_cli::commands::{bracket, briefing, chat, date, matches, standings, stays, status};
use fz_cli::{Cli, Commands, Config, DateAction, Source};

/// Load config and open the configured data source.
fn open_source(config_path: Option<&Path>) -> Result<(Source, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let source = Source::open(&config)?;
    Ok((source, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (mut source, config) = open_source(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Status => status::run(&mut stdout, &source)?,
        Commands::Date { action } => match action {
            None => date::show(&mut stdout, &source)?,
            Some(DateAction::Set { date: input }) => {
                date::set(&mut stdout, &mut source, &input, Local::now().date_naive())?;
            }
        },
        Commands::Matches {
            team,
            on,
            week,
            stage,
            json,
        } => {
            let args = MatchArgs {
                team,
                on,
                week,
                stage,
            };
            matches::run(&source, args, json)?;
        }
        Commands::Standings { group, json } => standings::run(&source, group.as_deref(), json)?,
        Commands::Bracket { json } => bracket::run(&source, json)?,
        Commands::Stays { fan, json } => stays::run(&source, resolve_fan(fan, &config)?, json)?,
        Commands::Briefing { fan } => briefing::run(&source, resolve_fan(fan, &config)?)?,
        Commands::Chat {
            message,
            fan,
            history,
            clear,
        } => {
            let action = if history {
                ChatAction::History
            } else if clear {
                ChatAction::Clear
            } else {
                ChatAction::Send(message.context("no message given")?)
            };
            chat::run(&source, resolve_fan(fan, &config)?, action)?;
        }
    }

    Ok(())
}
