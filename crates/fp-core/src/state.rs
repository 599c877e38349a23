//! Application state: pantry, profiles, plan history, settings.
//!
//! These are the pure state-transition counterparts of the web client's
//! cookie-backed stores. All methods mutate in-memory structures only;
//! persistence is an injected concern of the caller (see the store crate).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    AidStation, FoodAssignment, FoodCategory, FoodItem, FoodLibrary, PlanEntry, RacePlan,
    RaceProfile,
};
use crate::race;
use crate::timing::TimeFormatError;

// ========== Pantry ==========

/// The pantry: built-in default items plus user-added ones.
///
/// Default items are never mutated; editing one clones it into the user
/// list under a `-custom` id suffix.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    default_items: Vec<FoodItem>,
    user_items: Vec<FoodItem>,
}

/// A partial edit to a food item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct FoodItemUpdate {
    pub name: Option<String>,
    pub category: Option<FoodCategory>,
    pub serving_size: Option<String>,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub carbs: Option<f64>,
    pub proteins: Option<f64>,
    pub sodium: Option<f64>,
    pub caffeine: Option<f64>,
    pub volume: Option<f64>,
}

impl FoodItemUpdate {
    fn apply(&self, item: &mut FoodItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(serving) = &self.serving_size {
            item.serving_size.clone_from(serving);
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        let facts = &mut item.nutrition_facts;
        if let Some(calories) = self.calories {
            facts.calories = calories;
        }
        if let Some(carbs) = self.carbs {
            facts.carbs = carbs;
        }
        if let Some(proteins) = self.proteins {
            facts.proteins = proteins;
        }
        if let Some(sodium) = self.sodium {
            facts.sodium = sodium;
        }
        if let Some(caffeine) = self.caffeine {
            facts.caffeine = caffeine;
        }
        if let Some(volume) = self.volume {
            facts.volume = Some(volume);
        }
    }
}

impl Pantry {
    /// Creates a pantry from the default catalogue and previously persisted
    /// user items.
    #[must_use]
    pub fn new(default_items: Vec<FoodItem>, user_items: Vec<FoodItem>) -> Self {
        Self {
            default_items,
            user_items,
        }
    }

    /// All items, defaults first then user items.
    #[must_use]
    pub fn all_items(&self) -> Vec<FoodItem> {
        let mut items = self.default_items.clone();
        items.extend(self.user_items.iter().cloned());
        items
    }

    /// The user-added items, the only part that gets persisted.
    #[must_use]
    pub fn user_items(&self) -> &[FoodItem] {
        &self.user_items
    }

    /// Looks up an item by id across defaults and user items.
    ///
    /// Callers treat `None` as a stale reference and skip it.
    #[must_use]
    pub fn resolve(&self, item_id: &str) -> Option<&FoodItem> {
        self.default_items
            .iter()
            .chain(&self.user_items)
            .find(|item| item.id == item_id)
    }

    /// Adds a user item.
    pub fn add_item(&mut self, item: FoodItem) {
        self.user_items.push(item);
    }

    /// Applies an edit to an item.
    ///
    /// Editing a default item does not touch it; instead a copy with the
    /// edit applied is added to the user items under `{id}-custom`. Editing
    /// a user item updates it in place. Returns the id of the item that now
    /// carries the edit, or `None` if the id is unknown.
    pub fn update_item(&mut self, item_id: &str, update: &FoodItemUpdate) -> Option<String> {
        if let Some(default_item) = self.default_items.iter().find(|item| item.id == item_id) {
            let mut custom = default_item.clone();
            custom.id = format!("{item_id}-custom");
            update.apply(&mut custom);
            let id = custom.id.clone();
            self.user_items.push(custom);
            return Some(id);
        }
        let item = self.user_items.iter_mut().find(|item| item.id == item_id)?;
        update.apply(item);
        Some(item.id.clone())
    }

    /// Removes a user item. Default items cannot be removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.user_items.len();
        self.user_items.retain(|item| item.id != item_id);
        self.user_items.len() != before
    }

    /// Merges a food library into the user items, replacing items that
    /// share an id. Returns the number of items merged.
    pub fn import_library(&mut self, library: FoodLibrary) -> usize {
        let count = library.items.len();
        for item in library.items {
            if let Some(existing) = self.user_items.iter_mut().find(|i| i.id == item.id) {
                *existing = item;
            } else {
                self.user_items.push(item);
            }
        }
        count
    }
}

// ========== Race profiles ==========

/// A partial edit to an aid station. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct StationUpdate {
    pub name: Option<String>,
    pub distance_from_start: Option<f64>,
    pub elevation_from_start: Option<i32>,
    pub current_elevation: Option<i32>,
    pub estimated_time_from_start: Option<String>,
    pub assistance_allowed: Option<bool>,
    pub notes: Option<String>,
}

/// The set of race profiles and the current selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSet {
    pub profiles: Vec<RaceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<String>,
}

impl ProfileSet {
    /// A profile set seeded with a single template profile, selected.
    #[must_use]
    pub fn seeded(template: RaceProfile) -> Self {
        let selected_id = Some(template.id.clone());
        Self {
            profiles: vec![template],
            selected_id,
        }
    }

    /// The currently selected profile, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&RaceProfile> {
        let id = self.selected_id.as_deref()?;
        self.profiles.iter().find(|p| p.id == id)
    }

    fn profile_mut(&mut self, profile_id: &str) -> Option<&mut RaceProfile> {
        self.profiles.iter_mut().find(|p| p.id == profile_id)
    }

    /// Selects a profile by id. Returns false if the id is unknown.
    pub fn select(&mut self, profile_id: &str) -> bool {
        if self.profiles.iter().any(|p| p.id == profile_id) {
            self.selected_id = Some(profile_id.to_string());
            true
        } else {
            false
        }
    }

    /// Adds a profile, replacing any existing profile with the same id.
    pub fn add_profile(&mut self, profile: RaceProfile) {
        if let Some(existing) = self.profile_mut(&profile.id) {
            *existing = profile;
        } else {
            self.profiles.push(profile);
        }
    }

    /// Clones the template into a fresh profile and selects it.
    ///
    /// The new profile's id embeds the supplied timestamp so repeated calls
    /// stay distinct.
    pub fn create_from_template(
        &mut self,
        template: &RaceProfile,
        timestamp_millis: i64,
    ) -> &RaceProfile {
        let mut profile = template.clone();
        profile.id = format!("new-race-{timestamp_millis}");
        profile.name = "New Race".to_string();
        self.selected_id = Some(profile.id.clone());
        self.profiles.push(profile);
        self.profiles.last().unwrap_or_else(|| unreachable!())
    }

    /// Resets the selected profile to a copy of the template, keeping the
    /// selected id so the selection stays valid.
    pub fn reset_selected(&mut self, template: &RaceProfile) -> bool {
        let Some(id) = self.selected_id.clone() else {
            return false;
        };
        let Some(profile) = self.profile_mut(&id) else {
            return false;
        };
        let mut replacement = template.clone();
        replacement.id = id;
        *profile = replacement;
        true
    }

    /// Applies a field update to one station.
    ///
    /// A time update propagates pace-consistent times to every later
    /// station. The station list is re-sorted by distance afterwards in
    /// every case. Returns `Ok(false)` if the profile or station is
    /// unknown.
    pub fn update_station(
        &mut self,
        profile_id: &str,
        station_id: &str,
        update: &StationUpdate,
    ) -> Result<bool, TimeFormatError> {
        let Some(profile) = self.profile_mut(profile_id) else {
            return Ok(false);
        };
        let Some(station) = profile
            .aid_stations
            .iter_mut()
            .find(|s| s.id == station_id)
        else {
            return Ok(false);
        };

        if let Some(name) = &update.name {
            station.name.clone_from(name);
        }
        if let Some(distance) = update.distance_from_start {
            station.distance_from_start = distance;
        }
        if let Some(gain) = update.elevation_from_start {
            station.elevation_from_start = gain;
        }
        if let Some(elevation) = update.current_elevation {
            station.current_elevation = Some(elevation);
        }
        if let Some(allowed) = update.assistance_allowed {
            station.assistance_allowed = allowed;
        }
        if let Some(notes) = &update.notes {
            station.notes = Some(notes.clone());
        }
        if let Some(time) = &update.estimated_time_from_start {
            race::propagate_time_edit(&mut profile.aid_stations, station_id, time)?;
        }
        race::sort_stations(&mut profile.aid_stations);
        Ok(true)
    }

    /// Adds a station to a profile and re-sorts by distance.
    pub fn add_station(&mut self, profile_id: &str, station: AidStation) -> bool {
        let Some(profile) = self.profile_mut(profile_id) else {
            return false;
        };
        profile.aid_stations.push(station);
        race::sort_stations(&mut profile.aid_stations);
        true
    }

    /// Removes a station from a profile.
    pub fn remove_station(&mut self, profile_id: &str, station_id: &str) -> bool {
        let Some(profile) = self.profile_mut(profile_id) else {
            return false;
        };
        let before = profile.aid_stations.len();
        profile.aid_stations.retain(|s| s.id != station_id);
        profile.aid_stations.len() != before
    }

    /// Sets the assignment count for a food item at a station, replacing an
    /// existing assignment for the same item.
    pub fn assign_food(
        &mut self,
        profile_id: &str,
        station_id: &str,
        item_id: &str,
        count: u32,
    ) -> bool {
        let Some(profile) = self.profile_mut(profile_id) else {
            return false;
        };
        let Some(station) = profile
            .aid_stations
            .iter_mut()
            .find(|s| s.id == station_id)
        else {
            return false;
        };
        if let Some(assignment) = station
            .food_items
            .iter_mut()
            .find(|a| a.item_id == item_id)
        {
            assignment.count = count;
        } else {
            station.food_items.push(FoodAssignment {
                item_id: item_id.to_string(),
                count,
            });
        }
        true
    }

    /// Removes a food assignment from a station.
    pub fn unassign_food(&mut self, profile_id: &str, station_id: &str, item_id: &str) -> bool {
        let Some(profile) = self.profile_mut(profile_id) else {
            return false;
        };
        let Some(station) = profile
            .aid_stations
            .iter_mut()
            .find(|s| s.id == station_id)
        else {
            return false;
        };
        let before = station.food_items.len();
        station.food_items.retain(|a| a.item_id != item_id);
        station.food_items.len() != before
    }
}

// ========== Plan history ==========

/// Saved race plans, keyed by the profile name they snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanHistory {
    pub plans: Vec<RacePlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<String>,
}

impl PlanHistory {
    /// Inserts a plan, replacing any plan for the same profile name, and
    /// selects it.
    pub fn upsert(&mut self, plan: RacePlan) {
        self.selected_id = Some(plan.race_profile.name.clone());
        if let Some(existing) = self
            .plans
            .iter_mut()
            .find(|p| p.race_profile.name == plan.race_profile.name)
        {
            *existing = plan;
        } else {
            self.plans.push(plan);
        }
    }

    /// Looks up a plan by its profile name.
    #[must_use]
    pub fn get(&self, plan_id: &str) -> Option<&RacePlan> {
        self.plans.iter().find(|p| p.race_profile.name == plan_id)
    }

    /// Selects a plan. Returns false if unknown.
    pub fn select(&mut self, plan_id: &str) -> bool {
        if self.get(plan_id).is_some() {
            self.selected_id = Some(plan_id.to_string());
            true
        } else {
            false
        }
    }

    /// Removes a plan, clearing the selection if it pointed at it.
    pub fn remove(&mut self, plan_id: &str) -> bool {
        let before = self.plans.len();
        self.plans.retain(|p| p.race_profile.name != plan_id);
        if self.selected_id.as_deref() == Some(plan_id) {
            self.selected_id = None;
        }
        self.plans.len() != before
    }
}

/// Resolves a profile's assignments into a [`RacePlan`] snapshot.
///
/// Assignments that no longer resolve in the pantry are skipped with a
/// warning; the plan simply records less.
#[must_use]
pub fn build_race_plan(
    profile: &RaceProfile,
    pantry_items: &[FoodItem],
    now: DateTime<Utc>,
) -> RacePlan {
    let entries = profile
        .aid_stations
        .iter()
        .flat_map(|station| {
            station.food_items.iter().filter_map(|assignment| {
                let Some(item) = pantry_items.iter().find(|i| i.id == assignment.item_id) else {
                    tracing::warn!(
                        station = %station.id,
                        item = %assignment.item_id,
                        "dropping unresolvable assignment from race plan"
                    );
                    return None;
                };
                Some(PlanEntry {
                    food_item: item.clone(),
                    quantity: assignment.count,
                    aid_station_id: station.id.clone(),
                })
            })
        })
        .collect();

    RacePlan {
        id: profile.name.clone(),
        race_profile: profile.clone(),
        food_items: entries,
        created_at: now,
        updated_at: now,
    }
}

// ========== Settings ==========

use crate::units::{DistanceUnit, ElevationUnit, PaceUnit, VolumeUnit};

/// Display unit preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub distance_unit: DistanceUnit,
    pub elevation_unit: ElevationUnit,
    pub pace_unit: PaceUnit,
    pub volume_unit: VolumeUnit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Kilometers,
            elevation_unit: ElevationUnit::Meters,
            pace_unit: PaceUnit::MinPerKm,
            volume_unit: VolumeUnit::Milliliters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutritionFacts;
    use crate::seed;

    fn pantry() -> Pantry {
        Pantry::new(seed::default_food_items(), Vec::new())
    }

    fn custom_item(id: &str) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: id.to_string(),
            brand: None,
            category: FoodCategory::Bar,
            nutrition_facts: NutritionFacts::default(),
            serving_size: "50g".to_string(),
            description: None,
        }
    }

    #[test]
    fn pantry_lists_defaults_before_user_items() {
        let mut pantry = pantry();
        pantry.add_item(custom_item("my-bar"));
        let items = pantry.all_items();
        assert_eq!(items.len(), 5);
        assert_eq!(items.last().unwrap().id, "my-bar");
    }

    #[test]
    fn editing_a_default_item_clones_it_as_custom() {
        let mut pantry = pantry();
        let update = FoodItemUpdate {
            calories: Some(110.0),
            ..FoodItemUpdate::default()
        };
        let id = pantry.update_item("maurten-gel-100", &update).unwrap();
        assert_eq!(id, "maurten-gel-100-custom");

        // The default is untouched; the clone carries the edit.
        let original = pantry.resolve("maurten-gel-100").unwrap();
        assert!((original.nutrition_facts.calories - 100.0).abs() < f64::EPSILON);
        let custom = pantry.resolve(&id).unwrap();
        assert!((custom.nutrition_facts.calories - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn editing_a_user_item_updates_in_place() {
        let mut pantry = pantry();
        pantry.add_item(custom_item("my-bar"));
        let update = FoodItemUpdate {
            name: Some("Better Bar".to_string()),
            ..FoodItemUpdate::default()
        };
        let id = pantry.update_item("my-bar", &update).unwrap();
        assert_eq!(id, "my-bar");
        assert_eq!(pantry.resolve("my-bar").unwrap().name, "Better Bar");
        assert_eq!(pantry.user_items().len(), 1);
    }

    #[test]
    fn removing_is_limited_to_user_items() {
        let mut pantry = pantry();
        pantry.add_item(custom_item("my-bar"));
        assert!(pantry.remove_item("my-bar"));
        assert!(!pantry.remove_item("maurten-gel-100"));
        assert!(pantry.resolve("maurten-gel-100").is_some());
    }

    #[test]
    fn unknown_item_edit_returns_none() {
        let mut pantry = pantry();
        assert!(
            pantry
                .update_item("nope", &FoodItemUpdate::default())
                .is_none()
        );
    }

    #[test]
    fn import_library_replaces_by_id() {
        let mut pantry = pantry();
        pantry.add_item(custom_item("shared"));
        let mut replacement = custom_item("shared");
        replacement.name = "Shared v2".to_string();
        let library = FoodLibrary {
            items: vec![replacement, custom_item("brand-new")],
            brands: Vec::new(),
        };
        assert_eq!(pantry.import_library(library), 2);
        assert_eq!(pantry.user_items().len(), 2);
        assert_eq!(pantry.resolve("shared").unwrap().name, "Shared v2");
    }

    #[test]
    fn profile_set_selection() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        assert_eq!(profiles.selected().unwrap().id, "utmb-2024");
        assert!(!profiles.select("nope"));
        assert!(profiles.select("utmb-2024"));
    }

    #[test]
    fn create_from_template_clones_and_selects() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        let id = profiles
            .create_from_template(&seed::utmb_template(), 1_700_000_000_000)
            .id
            .clone();
        assert_eq!(id, "new-race-1700000000000");
        assert_eq!(profiles.profiles.len(), 2);
        let selected = profiles.selected().unwrap();
        assert_eq!(selected.name, "New Race");
        assert_eq!(selected.aid_stations.len(), 6);
    }

    #[test]
    fn reset_selected_keeps_the_selected_id() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        profiles.create_from_template(&seed::utmb_template(), 42);
        let selected_id = profiles.selected_id.clone().unwrap();

        assert!(profiles.reset_selected(&seed::utmb_template()));
        let selected = profiles.selected().unwrap();
        assert_eq!(selected.id, selected_id);
        assert_eq!(selected.name, "UTMB 2024");
    }

    #[test]
    fn station_time_update_propagates_and_sorts() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        let update = StationUpdate {
            estimated_time_from_start: Some("10:00:00".to_string()),
            ..StationUpdate::default()
        };
        assert!(
            profiles
                .update_station("utmb-2024", "courmayeur", &update)
                .unwrap()
        );

        let stations = &profiles.selected().unwrap().aid_stations;
        let courmayeur = stations.iter().find(|s| s.id == "courmayeur").unwrap();
        assert_eq!(courmayeur.estimated_time_from_start, "10:00:00");
        // Downstream stations are re-derived from the edited pace, so they
        // no longer carry their template times.
        let champex = stations.iter().find(|s| s.id == "champex-lac").unwrap();
        assert_ne!(champex.estimated_time_from_start, "14:00:57");
    }

    #[test]
    fn station_distance_update_resorts() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        let update = StationUpdate {
            distance_from_start: Some(500.0),
            ..StationUpdate::default()
        };
        profiles
            .update_station("utmb-2024", "start", &update)
            .unwrap();
        let stations = &profiles.selected().unwrap().aid_stations;
        assert_eq!(stations.last().unwrap().id, "start");
    }

    #[test]
    fn station_update_unknown_ids_return_false() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        let update = StationUpdate::default();
        assert!(
            !profiles
                .update_station("utmb-2024", "nope", &update)
                .unwrap()
        );
        assert!(!profiles.update_station("nope", "start", &update).unwrap());
    }

    #[test]
    fn assign_food_replaces_existing_count() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        assert!(profiles.assign_food("utmb-2024", "courmayeur", "maurten-gel-100", 2));
        assert!(profiles.assign_food("utmb-2024", "courmayeur", "maurten-gel-100", 5));

        let stations = &profiles.selected().unwrap().aid_stations;
        let station = stations.iter().find(|s| s.id == "courmayeur").unwrap();
        assert_eq!(station.food_items.len(), 1);
        assert_eq!(station.food_items[0].count, 5);

        assert!(profiles.unassign_food("utmb-2024", "courmayeur", "maurten-gel-100"));
        assert!(!profiles.unassign_food("utmb-2024", "courmayeur", "maurten-gel-100"));
    }

    #[test]
    fn plan_history_upsert_replaces_by_profile_name() {
        let now = Utc::now();
        let profile = seed::utmb_template();
        let mut history = PlanHistory::default();

        history.upsert(build_race_plan(&profile, &seed::default_food_items(), now));
        history.upsert(build_race_plan(&profile, &seed::default_food_items(), now));
        assert_eq!(history.plans.len(), 1);
        assert_eq!(history.selected_id.as_deref(), Some("UTMB 2024"));

        assert!(history.remove("UTMB 2024"));
        assert!(history.selected_id.is_none());
        assert!(!history.remove("UTMB 2024"));
    }

    #[test]
    fn build_race_plan_skips_dangling_assignments() {
        let mut profiles = ProfileSet::seeded(seed::utmb_template());
        profiles.assign_food("utmb-2024", "courmayeur", "maurten-gel-100", 3);
        profiles.assign_food("utmb-2024", "vallorcine", "deleted-item", 1);

        let plan = build_race_plan(
            profiles.selected().unwrap(),
            &seed::default_food_items(),
            Utc::now(),
        );
        assert_eq!(plan.food_items.len(), 1);
        assert_eq!(plan.food_items[0].quantity, 3);
        assert_eq!(plan.food_items[0].aid_station_id, "courmayeur");
        assert_eq!(plan.id, "UTMB 2024");
    }

    #[test]
    fn settings_defaults_are_metric() {
        let settings = Settings::default();
        assert_eq!(settings.distance_unit, DistanceUnit::Kilometers);
        assert_eq!(settings.pace_unit, PaceUnit::MinPerKm);
    }

    #[test]
    fn profile_set_serde_round_trip() {
        let profiles = ProfileSet::seeded(seed::utmb_template());
        let json = serde_json::to_string(&profiles).unwrap();
        assert!(json.contains("\"selectedId\""));
        let parsed: ProfileSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.profiles, profiles.profiles);
        assert_eq!(parsed.selected_id, profiles.selected_id);
    }
}
