//! `fp init`: create the data directory and seed default state.

use std::path::Path;

use anyhow::{Context, Result};
use fp_store::Database;

use crate::app::App;
use crate::config::Config;

/// Creates the data directory, opens the database, and persists the
/// seeded state. Existing blobs are kept as-is.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let db = Database::open(&config.database_path).context("failed to open database")?;

    let mut app = App::open(db)?;
    app.save_pantry()?;
    app.save_profiles()?;
    app.save_history()?;
    app.save_settings()?;

    println!("Initialized data at {}", config.database_path.display());
    println!(
        "Pantry: {} items. Selected race: {}",
        app.pantry.all_items().len(),
        app.selected_profile()
            .map_or("(none)".to_string(), |p| p.name.clone()),
    );
    Ok(())
}
