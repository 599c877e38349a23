//! `fp station`: manage the selected race's aid stations.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use fp_core::model::AidStation;
use fp_core::state::{Settings, StationUpdate};
use fp_core::{race, timing, units};

use crate::app::App;
use crate::cli::StationAction;

/// Defaults applied when `station add` is called without flags: one more
/// station, 10 km and 100 m past the last one, timed at a 6 min/km pace.
const DEFAULT_DISTANCE_STEP_KM: f64 = 10.0;
const DEFAULT_GAIN_STEP_M: i32 = 100;
const DEFAULT_PACE_MIN_PER_KM: f64 = 6.0;

pub fn run(app: &mut App, action: StationAction) -> Result<()> {
    match action {
        StationAction::List { json } => list(app, json),
        StationAction::Add {
            name,
            distance,
            elevation,
            time,
        } => add(app, name, distance, elevation, time),
        StationAction::Set {
            id,
            name,
            distance,
            elevation,
            time,
            delta,
        } => set(app, &id, name, distance, elevation, time, delta),
        StationAction::Remove { id } => {
            let profile_id = app.selected_profile()?.id.clone();
            if !app.profiles.remove_station(&profile_id, &id) {
                bail!("no aid station with id {id}");
            }
            app.save_profiles()?;
            println!("Removed {id}");
            Ok(())
        }
        StationAction::Assign {
            station,
            item,
            count,
        } => {
            app.pantry
                .resolve(&item)
                .with_context(|| format!("no food item with id {item}"))?;
            let profile_id = app.selected_profile()?.id.clone();
            if !app.profiles.assign_food(&profile_id, &station, &item, count) {
                bail!("no aid station with id {station}");
            }
            app.save_profiles()?;
            println!("Assigned {count}x {item} at {station}");
            Ok(())
        }
        StationAction::Unassign { station, item } => {
            let profile_id = app.selected_profile()?.id.clone();
            if !app.profiles.unassign_food(&profile_id, &station, &item) {
                bail!("no assignment of {item} at {station}");
            }
            app.save_profiles()?;
            println!("Unassigned {item} at {station}");
            Ok(())
        }
    }
}

fn list(app: &App, json: bool) -> Result<()> {
    let profile = app.selected_profile()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile.aid_stations)?);
        return Ok(());
    }
    print!("{}", format_stations(&profile.aid_stations, &app.settings)?);
    Ok(())
}

fn format_stations(
    stations: &[AidStation],
    settings: &Settings,
) -> Result<String, fp_core::TimeFormatError> {
    let mut output = String::new();
    writeln!(
        output,
        "{:<20} {:<24} {:>9} {:>8} {:>9} {:>7}  {}",
        "ID", "NAME", "DISTANCE", "CLIMB", "TIME", "PACE", "FOOD"
    )
    .unwrap();
    for (index, station) in stations.iter().enumerate() {
        let segment = race::segment_details(stations, index)?;
        let pace = units::convert_pace(
            segment.pace_min_per_km,
            units::PaceUnit::MinPerKm,
            settings.pace_unit,
        );
        let pace = if index == 0 || !pace.is_finite() {
            "-".to_string()
        } else {
            units::format_pace(pace, settings.pace_unit)
        };
        let food: Vec<String> = station
            .food_items
            .iter()
            .map(|a| format!("{}x{}", a.count, a.item_id))
            .collect();
        writeln!(
            output,
            "{:<20} {:<24} {:>9} {:>8} {:>9} {:>7}  {}",
            station.id,
            station.name,
            super::display_distance(station.distance_from_start, settings),
            super::display_elevation(f64::from(station.elevation_from_start), settings),
            station.estimated_time_from_start,
            pace,
            food.join(" "),
        )
        .unwrap();
    }
    Ok(output)
}

fn add(
    app: &mut App,
    name: Option<String>,
    distance: Option<f64>,
    elevation: Option<f64>,
    time: Option<String>,
) -> Result<()> {
    let settings = app.settings;
    let profile = app.selected_profile()?;
    let profile_id = profile.id.clone();
    let last = profile.aid_stations.last();

    let distance_km = distance.map_or_else(
        || last.map_or(0.0, |s| s.distance_from_start) + DEFAULT_DISTANCE_STEP_KM,
        |d| super::input_distance_km(d, &settings),
    );
    let gain = elevation.map_or_else(
        || last.map_or(0, |s| s.elevation_from_start) + DEFAULT_GAIN_STEP_M,
        |e| super::input_elevation_m(e, &settings),
    );
    let time = match time {
        Some(time) => {
            timing::parse_time(&time)?;
            time
        }
        None => timing::estimated_time(distance_km, DEFAULT_PACE_MIN_PER_KM),
    };
    let name = name.unwrap_or_else(|| format!("Aid Station {}", profile.aid_stations.len() + 1));
    let id = super::slugify(&name);
    if id.is_empty() {
        bail!("station name must contain at least one alphanumeric character");
    }
    if profile.aid_stations.iter().any(|s| s.id == id) {
        bail!("an aid station with id {id} already exists");
    }

    let station = AidStation {
        id: id.clone(),
        name,
        distance_from_start: distance_km,
        elevation_from_start: gain,
        current_elevation: None,
        estimated_time_from_start: time,
        assistance_allowed: true,
        food_items: Vec::new(),
        notes: None,
    };
    app.profiles.add_station(&profile_id, station);
    app.save_profiles()?;
    println!("Added {id}");
    Ok(())
}

fn set(
    app: &mut App,
    id: &str,
    name: Option<String>,
    distance: Option<f64>,
    elevation: Option<f64>,
    time: Option<String>,
    delta: bool,
) -> Result<()> {
    let settings = app.settings;
    let profile = app.selected_profile()?;
    let profile_id = profile.id.clone();

    let mut distance_km = distance.map(|d| super::input_distance_km(d, &settings));
    let mut gain = elevation.map(|e| super::input_elevation_m(e, &settings));
    if delta {
        let index = profile
            .aid_stations
            .iter()
            .position(|s| s.id == id)
            .with_context(|| format!("no aid station with id {id}"))?;
        let previous = index.checked_sub(1).map(|i| &profile.aid_stations[i]);
        if let Some(offset) = distance_km {
            distance_km = Some(previous.map_or(0.0, |s| s.distance_from_start) + offset);
        }
        if let Some(offset) = gain {
            gain = Some(previous.map_or(0, |s| s.elevation_from_start) + offset);
        }
    }

    let update = StationUpdate {
        name,
        distance_from_start: distance_km,
        elevation_from_start: gain,
        current_elevation: None,
        estimated_time_from_start: time,
        assistance_allowed: None,
        notes: None,
    };
    if !app.profiles.update_station(&profile_id, id, &update)? {
        bail!("no aid station with id {id}");
    }
    app.save_profiles()?;
    println!("Updated {id}");
    Ok(())
}
