//! `fp pantry`: manage the pantry of food items.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use fp_core::model::{FoodCategory, FoodItem, FoodLibrary, NutritionFacts};
use fp_core::state::FoodItemUpdate;

use crate::app::App;
use crate::cli::PantryAction;

pub fn run(app: &mut App, action: PantryAction) -> Result<()> {
    match action {
        PantryAction::List { json } => list(app, json),
        PantryAction::Add {
            name,
            category,
            calories,
            carbs,
            protein,
            sodium,
            caffeine,
            volume,
            serving,
            description,
        } => {
            let item = FoodItem {
                id: new_item_id(app, &name)?,
                name,
                brand: None,
                category: category.parse::<FoodCategory>()?,
                nutrition_facts: NutritionFacts {
                    calories,
                    carbs,
                    proteins: protein,
                    sodium,
                    caffeine,
                    volume,
                },
                serving_size: serving,
                description,
            };
            let id = item.id.clone();
            app.pantry.add_item(item);
            app.save_pantry()?;
            println!("Added {id}");
            Ok(())
        }
        PantryAction::Edit {
            id,
            name,
            category,
            calories,
            carbs,
            protein,
            sodium,
            caffeine,
            volume,
            serving,
            description,
        } => {
            let update = FoodItemUpdate {
                name,
                category: category
                    .map(|c| c.parse::<FoodCategory>())
                    .transpose()?,
                serving_size: serving,
                description,
                calories,
                carbs,
                proteins: protein,
                sodium,
                caffeine,
                volume,
            };
            let Some(updated_id) = app.pantry.update_item(&id, &update) else {
                bail!("no food item with id {id}");
            };
            app.save_pantry()?;
            if updated_id == id {
                println!("Updated {id}");
            } else {
                // Default items stay pristine; the edit landed on a copy.
                println!("Created custom copy {updated_id}");
            }
            Ok(())
        }
        PantryAction::Remove { id } => {
            if !app.pantry.remove_item(&id) {
                bail!("no removable food item with id {id} (default items cannot be removed)");
            }
            app.save_pantry()?;
            println!("Removed {id}");
            Ok(())
        }
        PantryAction::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let library: FoodLibrary = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a food library", file.display()))?;
            let count = app.pantry.import_library(library);
            app.save_pantry()?;
            println!("Imported {count} items");
            Ok(())
        }
    }
}

fn list(app: &App, json: bool) -> Result<()> {
    let items = app.pantry.all_items();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    print!("{}", format_items(&items));
    Ok(())
}

fn format_items(items: &[FoodItem]) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{:<28} {:<24} {:>6} {:>6} {:>6} {:>8} {:>8} {:>8}",
        "ID", "NAME", "KCAL", "CARBS", "PROT", "SODIUM", "CAFF", "VOLUME"
    )
    .unwrap();
    for item in items {
        let facts = &item.nutrition_facts;
        let volume = facts
            .volume
            .map_or_else(|| "-".to_string(), |v| format!("{v:.0}ml"));
        writeln!(
            output,
            "{:<28} {:<24} {:>6.0} {:>5.0}g {:>5.0}g {:>6.0}mg {:>6.0}mg {:>8}",
            item.id, item.name, facts.calories, facts.carbs, facts.proteins, facts.sodium,
            facts.caffeine, volume,
        )
        .unwrap();
    }
    output
}

/// Derives a fresh item id from the name, refusing collisions.
fn new_item_id(app: &App, name: &str) -> Result<String> {
    let id = super::slugify(name);
    if id.is_empty() {
        bail!("item name must contain at least one alphanumeric character");
    }
    if app.pantry.resolve(&id).is_some() {
        bail!("a food item with id {id} already exists");
    }
    Ok(id)
}
