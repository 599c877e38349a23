//! Application state assembled from the store.
//!
//! [`App`] loads every state blob once at startup, hands mutable state to
//! the command handlers, and writes blobs back as commands change them.
//! Missing or corrupt blobs fall back to the seeded defaults.

use anyhow::{Context, Result};
use chrono::Utc;
use fp_core::model::{FoodItem, RaceProfile};
use fp_core::seed;
use fp_core::state::{Pantry, PlanHistory, ProfileSet, Settings, build_race_plan};
use fp_store::{Database, keys, load_json, save_json};

/// The loaded application state plus the store it came from.
pub struct App {
    store: Database,
    pub pantry: Pantry,
    pub profiles: ProfileSet,
    pub history: PlanHistory,
    pub settings: Settings,
}

impl App {
    /// Loads all state from the store, seeding defaults where blobs are
    /// absent.
    ///
    /// Loading a stored profile set also refreshes the selected profile's
    /// plan snapshot in history, the same way the web client re-saved a
    /// plan whenever profiles loaded from its cookie.
    pub fn open(store: Database) -> Result<Self> {
        let user_items: Vec<FoodItem> =
            load_json(&store, keys::USER_PANTRY_ITEMS)?.unwrap_or_default();
        let pantry = Pantry::new(seed::default_food_items(), user_items);

        let stored_profiles: Option<ProfileSet> = load_json(&store, keys::RACE_PROFILES)?;
        let had_profiles = stored_profiles.is_some();
        let profiles =
            stored_profiles.unwrap_or_else(|| ProfileSet::seeded(seed::utmb_template()));

        let history = load_json(&store, keys::RACE_PLAN_HISTORY)?.unwrap_or_default();
        let settings = load_json(&store, keys::SETTINGS)?.unwrap_or_default();

        let mut app = Self {
            store,
            pantry,
            profiles,
            history,
            settings,
        };
        if had_profiles {
            if let Some(profile) = app.profiles.selected().cloned() {
                let plan = build_race_plan(&profile, &app.pantry.all_items(), Utc::now());
                app.history.upsert(plan);
                app.save_history()?;
            }
        }
        Ok(app)
    }

    /// The selected race profile, or an error telling the user how to pick
    /// one.
    pub fn selected_profile(&self) -> Result<&RaceProfile> {
        self.profiles
            .selected()
            .context("no race selected; run `fp race list` and `fp race select <id>`")
    }

    pub fn save_pantry(&mut self) -> Result<()> {
        save_json(
            &mut self.store,
            keys::USER_PANTRY_ITEMS,
            &self.pantry.user_items(),
        )
        .context("failed to save pantry")
    }

    pub fn save_profiles(&mut self) -> Result<()> {
        save_json(&mut self.store, keys::RACE_PROFILES, &self.profiles)
            .context("failed to save race profiles")
    }

    pub fn save_history(&mut self) -> Result<()> {
        save_json(&mut self.store, keys::RACE_PLAN_HISTORY, &self.history)
            .context("failed to save plan history")
    }

    pub fn save_settings(&mut self) -> Result<()> {
        save_json(&mut self.store, keys::SETTINGS, &self.settings)
            .context("failed to save settings")
    }
}
