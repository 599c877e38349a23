//! `fp history`: browse saved race plans.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::{Context, Result, bail};
use fp_core::model::RacePlan;

use crate::app::App;
use crate::cli::HistoryAction;

pub fn run(app: &mut App, action: HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            list(app);
            Ok(())
        }
        HistoryAction::Show { id, json } => {
            let plan = app
                .history
                .get(&id)
                .with_context(|| format!("no saved plan named {id}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(plan)?);
            } else {
                print!("{}", format_plan(plan));
            }
            Ok(())
        }
        HistoryAction::Remove { id } => {
            if !app.history.remove(&id) {
                bail!("no saved plan named {id}");
            }
            app.save_history()?;
            println!("Removed {id}");
            Ok(())
        }
    }
}

fn list(app: &App) {
    let mut output = String::new();
    for plan in &app.history.plans {
        let marker = if app.history.selected_id.as_deref() == Some(plan.id.as_str()) {
            "*"
        } else {
            " "
        };
        writeln!(
            output,
            "{marker} {:<28} saved {}  {} stations, {} items",
            plan.id,
            plan.updated_at.format("%Y-%m-%d %H:%M"),
            plan.race_profile.aid_stations.len(),
            plan.food_items.len(),
        )
        .unwrap();
    }
    print!("{output}");
}

/// Summarizes a saved plan, grouping its entries per station.
fn format_plan(plan: &RacePlan) -> String {
    let mut by_station: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for entry in &plan.food_items {
        by_station
            .entry(entry.aid_station_id.as_str())
            .or_default()
            .push(format!("{}x {}", entry.quantity, entry.food_item.name));
    }

    let mut output = String::new();
    writeln!(
        output,
        "{} (saved {})",
        plan.id,
        plan.updated_at.format("%Y-%m-%d %H:%M"),
    )
    .unwrap();
    for station in &plan.race_profile.aid_stations {
        let Some(entries) = by_station.get(station.id.as_str()) else {
            continue;
        };
        writeln!(
            output,
            "  {} ({}): {}",
            station.name,
            station.estimated_time_from_start,
            entries.join(", "),
        )
        .unwrap();
    }
    output
}
