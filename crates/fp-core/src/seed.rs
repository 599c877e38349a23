//! Seed data: the default pantry and the template race profile.

use crate::model::{
    AidStation, FoodCategory, FoodItem, NutritionFacts, RaceProfile,
};

fn maurten(id: &str, name: &str, category: FoodCategory, calories: f64, carbs: f64, serving: &str, description: &str) -> FoodItem {
    FoodItem {
        id: id.to_string(),
        name: name.to_string(),
        brand: None,
        category,
        nutrition_facts: NutritionFacts {
            calories,
            carbs,
            proteins: 0.0,
            sodium: 0.0,
            caffeine: 0.0,
            volume: None,
        },
        serving_size: serving.to_string(),
        description: Some(description.to_string()),
    }
}

/// The default food items every pantry starts with.
#[must_use]
pub fn default_food_items() -> Vec<FoodItem> {
    vec![
        maurten(
            "maurten-gel-100",
            "Maurten Gel 100",
            FoodCategory::Gel,
            100.0,
            25.0,
            "40g",
            "High-carb energy gel with hydrogel technology",
        ),
        maurten(
            "maurten-gel-160",
            "Maurten Gel 160",
            FoodCategory::Gel,
            160.0,
            40.0,
            "40g",
            "High-carb energy gel with hydrogel technology",
        ),
        maurten(
            "maurten-drink-320",
            "Maurten Drink Mix 320",
            FoodCategory::Drink,
            320.0,
            80.0,
            "500ml",
            "High-carb drink mix with hydrogel technology",
        ),
        maurten(
            "maurten-drink-160",
            "Maurten Drink Mix 160",
            FoodCategory::Drink,
            160.0,
            40.0,
            "500ml",
            "High-carb drink mix with hydrogel technology",
        ),
    ]
}

fn utmb_station(
    id: &str,
    name: &str,
    distance: f64,
    gain: i32,
    elevation: i32,
    time: &str,
) -> AidStation {
    AidStation {
        id: id.to_string(),
        name: name.to_string(),
        distance_from_start: distance,
        elevation_from_start: gain,
        current_elevation: Some(elevation),
        estimated_time_from_start: time.to_string(),
        assistance_allowed: true,
        food_items: Vec::new(),
        notes: None,
    }
}

/// The UTMB 2024 template profile new races are cloned from.
#[must_use]
pub fn utmb_template() -> RaceProfile {
    RaceProfile {
        id: "utmb-2024".to_string(),
        name: "UTMB 2024".to_string(),
        total_distance: 171.5,
        total_elevation_gain: 10000.0,
        total_elevation_loss: 10000.0,
        start_location: "Chamonix".to_string(),
        finish_location: "Chamonix".to_string(),
        start_elevation: 1043,
        aid_stations: vec![
            utmb_station("start", "Start Line", 0.0, 0, 1043, "00:00:00"),
            utmb_station(
                "les-contamines",
                "Les Contamines Montjoie",
                31.7,
                1400,
                1162,
                "02:44:30",
            ),
            utmb_station("courmayeur", "Courmayeur", 79.0, 3900, 1191, "08:42:00"),
            utmb_station("champex-lac", "Champex-Lac", 121.5, 5700, 1479, "14:00:57"),
            utmb_station("vallorcine", "Vallorcine", 150.0, 7200, 1265, "17:31:26"),
            utmb_station("finish", "Finish Line", 171.5, 10000, 1043, "19:54:23"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_stations_are_in_canonical_order() {
        let profile = utmb_template();
        let mut sorted = profile.aid_stations.clone();
        crate::race::sort_stations(&mut sorted);
        assert_eq!(sorted, profile.aid_stations);
    }

    #[test]
    fn default_pantry_has_the_maurten_lineup() {
        let items = default_food_items();
        assert_eq!(items.len(), 4);
        assert!(items.iter().any(|i| i.id == "maurten-gel-100"));
        assert!(
            items
                .iter()
                .all(|i| matches!(i.category, FoodCategory::Gel | FoodCategory::Drink))
        );
    }
}
