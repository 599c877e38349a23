//! `fp race`: manage race profiles.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use fp_core::model::RaceProfile;
use fp_core::seed;
use fp_core::state::build_race_plan;
use fp_feed::{FeedClient, FeedFormat, ParsedFeed};

use crate::app::App;
use crate::cli::RaceAction;

pub fn run(app: &mut App, action: RaceAction) -> Result<()> {
    match action {
        RaceAction::List => {
            list(app);
            Ok(())
        }
        RaceAction::Show { json } => show(app, json),
        RaceAction::New { name } => {
            let id = app
                .profiles
                .create_from_template(&seed::utmb_template(), Utc::now().timestamp_millis())
                .id
                .clone();
            if let Some(name) = name {
                if let Some(profile) = app.profiles.profiles.iter_mut().find(|p| p.id == id) {
                    profile.name = name;
                }
            }
            app.save_profiles()?;
            println!("Created and selected {id}");
            Ok(())
        }
        RaceAction::Select { id } => {
            if !app.profiles.select(&id) {
                bail!("no race profile with id {id}");
            }
            app.save_profiles()?;
            println!("Selected {id}");
            Ok(())
        }
        RaceAction::Reset => {
            if !app.profiles.reset_selected(&seed::utmb_template()) {
                bail!("no race selected");
            }
            app.save_profiles()?;
            println!("Reset selected race to the template");
            Ok(())
        }
        RaceAction::Save => {
            let profile = app.selected_profile()?.clone();
            let plan = build_race_plan(&profile, &app.pantry.all_items(), Utc::now());
            let id = plan.id.clone();
            app.history.upsert(plan);
            app.save_history()?;
            println!("Saved plan {id}");
            Ok(())
        }
        RaceAction::Import {
            source,
            format,
            name,
        } => import(app, &source, format.map(FeedFormat::from), name),
    }
}

fn list(app: &App) {
    let mut output = String::new();
    for profile in &app.profiles.profiles {
        let marker = if app.profiles.selected_id.as_deref() == Some(profile.id.as_str()) {
            "*"
        } else {
            " "
        };
        writeln!(
            output,
            "{marker} {:<28} {:<24} {} stations",
            profile.id,
            profile.name,
            profile.aid_stations.len(),
        )
        .unwrap();
    }
    print!("{output}");
}

fn show(app: &App, json: bool) -> Result<()> {
    let profile = app.selected_profile()?;
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }
    let settings = &app.settings;
    println!("{} ({})", profile.name, profile.id);
    println!(
        "  {} from {} to {}, {} of climb",
        super::display_distance(profile.total_distance, settings),
        profile.start_location,
        profile.finish_location,
        super::display_elevation(profile.total_elevation_gain, settings),
    );
    println!("  {} aid stations", profile.aid_stations.len());
    Ok(())
}

fn import(app: &mut App, source: &str, format: Option<FeedFormat>, name: Option<String>) -> Result<()> {
    let is_url = source.starts_with("http://") || source.starts_with("https://");
    let document = if is_url {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start async runtime")?;
        runtime.block_on(FeedClient::new().fetch(source))?
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?
    };

    let feed = match format {
        Some(format) => format.parse(&document)?,
        None => fp_feed::parse_feed(&document)?,
    };

    let name = name.unwrap_or_else(|| derive_name(source, is_url));
    let profile = profile_from_feed(&name, &feed);
    let id = profile.id.clone();
    tracing::info!(%id, checkpoints = feed.checkpoints.len(), "imported race from feed");

    app.profiles.add_profile(profile);
    app.profiles.select(&id);
    app.save_profiles()?;
    println!(
        "Imported {name} ({id}): {} checkpoints over {}",
        feed.checkpoints.len(),
        super::display_distance(feed.total_distance, &app.settings),
    );
    Ok(())
}

/// Picks a race name from the source when none was given.
fn derive_name(source: &str, is_url: bool) -> String {
    let name = if is_url {
        fp_feed::extract_race_name(source)
    } else {
        Path::new(source)
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
    };
    if name.is_empty() {
        "Imported Race".to_string()
    } else {
        name
    }
}

/// Builds a race profile around a parsed feed's checkpoints.
///
/// The feed carries no descent data, so the loss total stays zero.
fn profile_from_feed(name: &str, feed: &ParsedFeed) -> RaceProfile {
    let start = feed.checkpoints.first();
    let id = match super::slugify(name) {
        id if id.is_empty() => "imported-race".to_string(),
        id => id,
    };
    RaceProfile {
        id,
        name: name.to_string(),
        total_distance: feed.total_distance,
        total_elevation_gain: f64::from(feed.total_elevation_gain),
        total_elevation_loss: 0.0,
        start_location: start.map_or_else(String::new, |s| s.name.clone()),
        finish_location: feed
            .checkpoints
            .last()
            .map_or_else(String::new, |s| s.name.clone()),
        start_elevation: start.and_then(|s| s.current_elevation).unwrap_or(0),
        aid_stations: feed.checkpoints.clone(),
    }
}
