//! Intake guidance: rating hourly averages against published fueling bands.
//!
//! Thresholds follow common endurance-nutrition guidance (e.g. 30-90 g of
//! carbs per hour depending on gut training). Each band maps a half-open
//! `[min, max)` range of an hourly rate to a rating and a short note.

use serde::Serialize;

use crate::nutrition::MetricTotals;

/// The six tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Carbs,
    Calories,
    Protein,
    Sodium,
    Volume,
    Caffeine,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Self; 6] = [
        Self::Carbs,
        Self::Calories,
        Self::Protein,
        Self::Sodium,
        Self::Volume,
        Self::Caffeine,
    ];

    /// Display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Carbs => "carbs",
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Sodium => "sodium",
            Self::Volume => "volume",
            Self::Caffeine => "caffeine",
        }
    }

    /// Unit suffix for hourly rates of this metric.
    #[must_use]
    pub const fn rate_unit(&self) -> &'static str {
        match self {
            Self::Carbs | Self::Protein => "g/h",
            Self::Calories => "kcal/h",
            Self::Sodium | Self::Caffeine => "mg/h",
            Self::Volume => "ml/h",
        }
    }

    /// Extracts this metric's value from a set of totals.
    #[must_use]
    pub const fn of(&self, totals: &MetricTotals) -> f64 {
        match self {
            Self::Carbs => totals.carbs,
            Self::Calories => totals.calories,
            Self::Protein => totals.protein,
            Self::Sodium => totals.sodium,
            Self::Volume => totals.volume,
            Self::Caffeine => totals.caffeine,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Qualitative rating of an hourly intake rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Risky,
    Borderline,
    Good,
}

impl Rating {
    /// Short marker for table output.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Risky => "!!",
            Self::Borderline => "~",
            Self::Good => "ok",
        }
    }
}

/// One guidance band: a half-open `[min, max)` range of an hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntakeBand {
    pub min: f64,
    pub max: f64,
    pub rating: Rating,
    pub note: &'static str,
}

const fn band(min: f64, max: f64, rating: Rating, note: &'static str) -> IntakeBand {
    IntakeBand {
        min,
        max,
        rating,
        note,
    }
}

const CARB_BANDS: [IntakeBand; 5] = [
    band(0.0, 30.0, Rating::Risky, "very low carbs, risk of bonking; aim for at least 30g/hour"),
    band(30.0, 50.0, Rating::Borderline, "on the low side, you could fade later in long events"),
    band(50.0, 90.0, Rating::Good, "good range for stable energy; elites go 60-90g/hour with gut training"),
    band(90.0, 110.0, Rating::Borderline, "high intake, can boost performance but watch for GI distress"),
    band(110.0, f64::INFINITY, Rating::Risky, "excessive, most guts cannot absorb this much"),
];

const CALORIE_BANDS: [IntakeBand; 5] = [
    band(0.0, 150.0, Rating::Risky, "too low, big energy deficit likely unless the effort is short"),
    band(150.0, 250.0, Rating::Borderline, "may work for shorter efforts, often not enough for ultras"),
    band(250.0, 350.0, Rating::Good, "generally optimal for sustaining long efforts"),
    band(350.0, 450.0, Rating::Borderline, "high end, tolerable for big or elite athletes"),
    band(450.0, f64::INFINITY, Rating::Risky, "excessive, risk of stomach overload"),
];

const PROTEIN_BANDS: [IntakeBand; 1] = [band(
    0.0,
    f64::INFINITY,
    Rating::Good,
    "5-10g/hour helps prevent muscle breakdown on efforts over three hours",
)];

const SODIUM_BANDS: [IntakeBand; 5] = [
    band(0.0, 300.0, Rating::Risky, "too low, risk of cramps"),
    band(300.0, 500.0, Rating::Borderline, "low end, okay in cool conditions but be cautious in heat"),
    band(500.0, 800.0, Rating::Good, "ideal for most, maintains electrolyte balance"),
    band(800.0, 1200.0, Rating::Borderline, "high, for heavy sweaters or hot conditions"),
    band(1200.0, f64::INFINITY, Rating::Risky, "excessive, possible bloating or GI issues"),
];

const VOLUME_BANDS: [IntakeBand; 5] = [
    band(0.0, 300.0, Rating::Risky, "very low fluid, risk of dehydration in heat"),
    band(300.0, 500.0, Rating::Borderline, "borderline low, may be adequate in cool temperatures"),
    band(500.0, 750.0, Rating::Good, "common sweet spot to match sweat rate"),
    band(750.0, 1000.0, Rating::Borderline, "high, watch for sloshing or hyponatremia risk"),
    band(1000.0, f64::INFINITY, Rating::Risky, "excessive, can lead to water overload"),
];

const CAFFEINE_BANDS: [IntakeBand; 3] = [
    band(0.0, 10.0, Rating::Risky, "little or no caffeine, you may feel sluggish overnight"),
    band(10.0, 80.0, Rating::Good, "highly individual, test your tolerance before race day"),
    band(80.0, f64::INFINITY, Rating::Risky, "excessive, likely jitters or nausea"),
];

/// Returns the guidance band for an hourly rate of the given metric.
///
/// Returns `None` for negative (or NaN) rates, which fall outside every
/// band.
#[must_use]
pub fn assess(metric: Metric, hourly_rate: f64) -> Option<&'static IntakeBand> {
    let bands: &[IntakeBand] = match metric {
        Metric::Carbs => &CARB_BANDS,
        Metric::Calories => &CALORIE_BANDS,
        Metric::Protein => &PROTEIN_BANDS,
        Metric::Sodium => &SODIUM_BANDS,
        Metric::Volume => &VOLUME_BANDS,
        Metric::Caffeine => &CAFFEINE_BANDS,
    };
    bands
        .iter()
        .find(|band| hourly_rate >= band.min && hourly_rate < band.max)
}
