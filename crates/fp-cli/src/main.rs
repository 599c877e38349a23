use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fp_cli::commands::{history, init, pantry, plan, race, settings, station};
use fp_cli::{App, Cli, Commands, Config};

/// Load config and open the database, ensuring the data directory exists.
fn open_app(config_path: Option<&Path>) -> Result<App> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let db = fp_store::Database::open(&config.database_path).context("failed to open database")?;
    App::open(db)
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
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match cli.command {
        Some(Commands::Init) => init::run(cli.config.as_deref())?,
        Some(Commands::Pantry { action }) => {
            let mut app = open_app(cli.config.as_deref())?;
            pantry::run(&mut app, action)?;
        }
        Some(Commands::Race { action }) => {
            let mut app = open_app(cli.config.as_deref())?;
            race::run(&mut app, action)?;
        }
        Some(Commands::Station { action }) => {
            let mut app = open_app(cli.config.as_deref())?;
            station::run(&mut app, action)?;
        }
        Some(Commands::Plan {
            view,
            json,
            averages,
        }) => {
            let app = open_app(cli.config.as_deref())?;
            plan::run(&app, view.into(), json, averages)?;
        }
        Some(Commands::History { action }) => {
            let mut app = open_app(cli.config.as_deref())?;
            history::run(&mut app, action)?;
        }
        Some(Commands::Settings { action }) => {
            let mut app = open_app(cli.config.as_deref())?;
            settings::run(&mut app, action)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
