//! Data model for race profiles, aid stations, and food items.
//!
//! All types serialize as camelCase JSON so that persisted blobs match the
//! shape the web client stored in its cookies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nutrition facts for a single serving of a food item.
///
/// Carbs and proteins are grams, sodium and caffeine milligrams, volume
/// milliliters. Volume is optional since solid foods have none.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub calories: f64,
    pub carbs: f64,
    pub proteins: f64,
    pub sodium: f64,
    #[serde(default)]
    pub caffeine: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Food item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodCategory {
    #[serde(rename = "GEL")]
    Gel,
    #[serde(rename = "DRINK")]
    Drink,
    #[serde(rename = "BAR")]
    Bar,
}

impl FoodCategory {
    /// String representation as stored in the food library.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gel => "GEL",
            Self::Drink => "DRINK",
            Self::Bar => "BAR",
        }
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FoodCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GEL" => Ok(Self::Gel),
            "DRINK" => Ok(Self::Drink),
            "BAR" => Ok(Self::Bar),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Error for unrecognized food categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown food category: {0}")]
pub struct UnknownCategory(pub String);

/// A food brand from the shared food library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A food item in the pantry or library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    pub category: FoodCategory,
    pub nutrition_facts: NutritionFacts,
    pub serving_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A shared catalogue of food items, grouped by brand.
///
/// This is the decoded payload of the spreadsheet-backed library endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLibrary {
    pub items: Vec<FoodItem>,
    pub brands: Vec<Brand>,
}

/// Assignment of a food item to an aid station.
///
/// `item_id` is a weak reference into the pantry. Removing the referenced
/// item does not cascade here; consumers skip assignments they cannot
/// resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAssignment {
    pub item_id: String,
    pub count: u32,
}

/// An aid station (checkpoint) along a race route.
///
/// Within a profile's station list sorted by distance, `distance_from_start`,
/// `elevation_from_start`, and `estimated_time_from_start` are all
/// non-decreasing. The sort by distance is the canonical order and is
/// re-applied after every structural edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AidStation {
    pub id: String,
    pub name: String,
    /// Kilometers from the start line.
    pub distance_from_start: f64,
    /// Cumulative elevation gain in meters.
    pub elevation_from_start: i32,
    /// Absolute elevation in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_elevation: Option<i32>,
    /// Elapsed time from the start, `HH:MM:SS`.
    pub estimated_time_from_start: String,
    pub assistance_allowed: bool,
    #[serde(default)]
    pub food_items: Vec<FoodAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A race profile: route metadata plus its ordered aid stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceProfile {
    pub id: String,
    pub name: String,
    /// Kilometers.
    pub total_distance: f64,
    /// Meters.
    pub total_elevation_gain: f64,
    /// Meters.
    pub total_elevation_loss: f64,
    pub start_location: String,
    pub finish_location: String,
    /// Meters.
    pub start_elevation: i32,
    pub aid_stations: Vec<AidStation>,
}

/// One resolved assignment inside a [`RacePlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub food_item: FoodItem,
    pub quantity: u32,
    pub aid_station_id: String,
}

/// A saved snapshot of a profile with its assignments fully resolved.
///
/// Plans live in the plan history; unlike the profile itself they embed the
/// food items, so they survive later pantry edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RacePlan {
    pub id: String,
    pub race_profile: RaceProfile,
    pub food_items: Vec<PlanEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_category_round_trips_through_str() {
        for category in [FoodCategory::Gel, FoodCategory::Drink, FoodCategory::Bar] {
            assert_eq!(category.as_str().parse::<FoodCategory>(), Ok(category));
        }
        assert!("SOUP".parse::<FoodCategory>().is_err());
    }

    #[test]
    fn food_category_parse_is_case_insensitive() {
        assert_eq!("gel".parse::<FoodCategory>(), Ok(FoodCategory::Gel));
        assert_eq!("Drink".parse::<FoodCategory>(), Ok(FoodCategory::Drink));
    }

    #[test]
    fn aid_station_serializes_camel_case() {
        let station = AidStation {
            id: "start".to_string(),
            name: "Start Line".to_string(),
            distance_from_start: 0.0,
            elevation_from_start: 0,
            current_elevation: Some(1043),
            estimated_time_from_start: "00:00:00".to_string(),
            assistance_allowed: true,
            food_items: vec![FoodAssignment {
                item_id: "maurten-gel-100".to_string(),
                count: 2,
            }],
            notes: None,
        };
        let json = serde_json::to_value(&station).unwrap();
        assert_eq!(json["distanceFromStart"], 0.0);
        assert_eq!(json["estimatedTimeFromStart"], "00:00:00");
        assert_eq!(json["foodItems"][0]["itemId"], "maurten-gel-100");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn aid_station_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "cp1",
            "name": "First",
            "distanceFromStart": 10.5,
            "elevationFromStart": 400,
            "estimatedTimeFromStart": "01:00:00",
            "assistanceAllowed": false
        }"#;
        let station: AidStation = serde_json::from_str(json).unwrap();
        assert!(station.current_elevation.is_none());
        assert!(station.food_items.is_empty());
    }

    #[test]
    fn nutrition_facts_default_caffeine_and_volume() {
        let facts: NutritionFacts =
            serde_json::from_str(r#"{"calories":100,"carbs":25,"proteins":0,"sodium":0}"#).unwrap();
        assert!((facts.caffeine - 0.0).abs() < f64::EPSILON);
        assert!(facts.volume.is_none());
    }

    #[test]
    fn food_library_deserializes_spreadsheet_payload() {
        let json = r#"{
            "items": [{
                "id": "maurten-gel-100",
                "name": "Gel 100",
                "brand": {"id": "maurten", "name": "Maurten", "iconUrl": "https://example.com/m.png"},
                "category": "GEL",
                "nutritionFacts": {"calories": 100, "carbs": 25, "proteins": 0, "sodium": 0, "caffeine": 0},
                "servingSize": "40g"
            }],
            "brands": [{"id": "maurten", "name": "Maurten"}]
        }"#;
        let library: FoodLibrary = serde_json::from_str(json).unwrap();
        assert_eq!(library.items.len(), 1);
        assert_eq!(library.items[0].brand.as_ref().unwrap().name, "Maurten");
        assert_eq!(library.brands.len(), 1);
    }
}
