//! Nutrition aggregation over a race plan.
//!
//! For each aid station the aggregator sums the six tracked metrics over the
//! station's assigned food items and derives hourly intake rates. Two view
//! modes exist: cumulative totals since the start, or per-segment intake.
//!
//! In segments mode a row reports what the runner picked up at the
//! *previous* station, consumed over the segment leading to the current one.
//! The first station has no preceding segment and produces no row.

use serde::{Deserialize, Serialize};

use crate::model::{AidStation, FoodItem};
use crate::timing::{self, TimeFormatError};

/// How nutrition rows are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Running totals from the race start through each station.
    SinceStart,
    /// Per-segment intake between consecutive stations.
    Segments,
}

/// The six tracked metrics, as one value each.
///
/// Doubles as absolute totals and as hourly rates depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTotals {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub sodium: f64,
    pub volume: f64,
    pub caffeine: f64,
}

impl MetricTotals {
    fn add(&mut self, other: Self) {
        self.calories += other.calories;
        self.carbs += other.carbs;
        self.protein += other.protein;
        self.sodium += other.sodium;
        self.volume += other.volume;
        self.caffeine += other.caffeine;
    }

    fn div(self, divisor: f64) -> Self {
        Self {
            calories: self.calories / divisor,
            carbs: self.carbs / divisor,
            protein: self.protein / divisor,
            sodium: self.sodium / divisor,
            volume: self.volume / divisor,
            caffeine: self.caffeine / divisor,
        }
    }
}

/// One computed nutrition row. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPoint {
    /// The station this row belongs to.
    pub station: String,
    /// Row label: the station name, or `"From A to B"` in segments mode.
    pub display_name: String,
    /// Elapsed time at the station, `HH:MM:SS`.
    pub time_from_start: String,
    /// Absolute metric totals for the row.
    pub totals: MetricTotals,
    /// Hourly intake rates for the row.
    pub per_hour: MetricTotals,
}

/// Sums the metrics contributed by one station's own assignments.
///
/// Assignments whose item id does not resolve in the pantry are skipped
/// with a warning; stale references must not break the table.
fn station_contribution(station: &AidStation, pantry: &[FoodItem]) -> MetricTotals {
    let mut totals = MetricTotals::default();
    for assignment in &station.food_items {
        let Some(item) = pantry.iter().find(|item| item.id == assignment.item_id) else {
            tracing::warn!(
                station = %station.id,
                item = %assignment.item_id,
                "skipping assignment of unknown food item"
            );
            continue;
        };
        let count = f64::from(assignment.count);
        let facts = &item.nutrition_facts;
        totals.add(MetricTotals {
            calories: facts.calories * count,
            carbs: facts.carbs * count,
            protein: facts.proteins * count,
            sodium: facts.sodium * count,
            volume: facts.volume.unwrap_or(0.0) * count,
            caffeine: facts.caffeine * count,
        });
    }
    totals
}

/// Computes the nutrition table for a station list.
///
/// Pure and restartable: no internal state, safe to re-invoke on every
/// render. Stations are processed in the order given.
pub fn calculate_nutrition(
    stations: &[AidStation],
    pantry: &[FoodItem],
    view_mode: ViewMode,
) -> Result<Vec<NutritionPoint>, TimeFormatError> {
    let mut rows = Vec::new();
    let mut cumulative = MetricTotals::default();

    for (index, station) in stations.iter().enumerate() {
        match view_mode {
            ViewMode::SinceStart => {
                cumulative.add(station_contribution(station, pantry));
                let hours = timing::time_to_hours(&station.estimated_time_from_start)?;
                let per_hour = if hours > 0.0 {
                    cumulative.div(hours)
                } else {
                    MetricTotals::default()
                };
                rows.push(NutritionPoint {
                    station: station.name.clone(),
                    display_name: station.name.clone(),
                    time_from_start: station.estimated_time_from_start.clone(),
                    totals: cumulative,
                    per_hour,
                });
            }
            ViewMode::Segments => {
                // No segment precedes the first station.
                if index == 0 {
                    continue;
                }
                let previous = &stations[index - 1];
                let segment_hours = timing::time_to_hours(&station.estimated_time_from_start)?
                    - timing::time_to_hours(&previous.estimated_time_from_start)?;
                // What was picked up at the previous station, consumed over
                // the segment ending here.
                let totals = station_contribution(previous, pantry);
                let per_hour = if segment_hours > 0.0 {
                    totals.div(segment_hours)
                } else {
                    MetricTotals::default()
                };
                rows.push(NutritionPoint {
                    station: station.name.clone(),
                    display_name: format!("From {} to {}", previous.name, station.name),
                    time_from_start: station.estimated_time_from_start.clone(),
                    totals,
                    per_hour,
                });
            }
        }
    }
    Ok(rows)
}

/// Arithmetic mean of the hourly rates across all rows.
///
/// Empty input yields zeros rather than dividing by zero.
#[must_use]
pub fn race_averages(rows: &[NutritionPoint]) -> MetricTotals {
    if rows.is_empty() {
        return MetricTotals::default();
    }
    let mut sum = MetricTotals::default();
    for row in rows {
        sum.add(row.per_hour);
    }
    #[expect(clippy::cast_precision_loss, reason = "row counts are tiny")]
    let count = rows.len() as f64;
    sum.div(count)
}
