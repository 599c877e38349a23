//! Core domain logic for the fueling planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Race profiles: aid stations with distance/elevation/time, pace-consistent
//!   time propagation after edits
//! - Nutrition: per-station intake totals and hourly rates over a pantry of
//!   food items
//! - Units: distance/elevation/pace/volume conversions and display formatting
//!
//! Everything here is pure: no I/O, no clocks beyond what callers inject.

pub mod guidance;
pub mod model;
pub mod nutrition;
pub mod race;
pub mod seed;
pub mod state;
pub mod timing;
pub mod units;

pub use model::{
    AidStation, Brand, FoodAssignment, FoodCategory, FoodItem, FoodLibrary, NutritionFacts,
    PlanEntry, RacePlan, RaceProfile,
};
pub use nutrition::{MetricTotals, NutritionPoint, ViewMode, calculate_nutrition, race_averages};
pub use race::{SegmentDetails, propagate_time_edit, segment_details, sort_stations};
pub use timing::{TimeFormatError, format_time, parse_time};
