//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fp_core::nutrition::ViewMode;
use fp_feed::FeedFormat;

/// Trail-race fueling planner.
///
/// Build a pantry of food items, lay out a race profile of aid stations,
/// assign food to stations, and review the resulting intake plan.
#[derive(Debug, Parser)]
#[command(name = "fp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data directory and seed the default pantry and race.
    Init,

    /// Manage the pantry of food items.
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },

    /// Manage race profiles.
    Race {
        #[command(subcommand)]
        action: RaceAction,
    },

    /// Manage the selected race's aid stations.
    Station {
        #[command(subcommand)]
        action: StationAction,
    },

    /// Show the nutrition plan for the selected race.
    Plan {
        /// Aggregation mode.
        #[arg(long, value_enum, default_value_t = ViewArg::SinceStart)]
        view: ViewArg,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Also show race-average hourly rates with intake guidance.
        #[arg(long)]
        averages: bool,
    },

    /// Browse saved race plans.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change display units.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Nutrition view mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// Cumulative totals since the race start.
    SinceStart,
    /// Per-segment intake between consecutive stations.
    Segments,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::SinceStart => Self::SinceStart,
            ViewArg::Segments => Self::Segments,
        }
    }
}

/// Feed document format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xml,
    Html,
}

impl From<FormatArg> for FeedFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xml => Self::Xml,
            FormatArg::Html => Self::Html,
        }
    }
}

/// Pantry subcommands.
#[derive(Debug, Subcommand)]
pub enum PantryAction {
    /// List all food items.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Add a food item.
    Add {
        /// Item name.
        #[arg(long)]
        name: String,

        /// Category: gel, drink, or bar.
        #[arg(long)]
        category: String,

        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        /// Carbs in grams.
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Protein in grams.
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Sodium in milligrams.
        #[arg(long, default_value_t = 0.0)]
        sodium: f64,

        /// Caffeine in milligrams.
        #[arg(long, default_value_t = 0.0)]
        caffeine: f64,

        /// Volume in milliliters, for drinks.
        #[arg(long)]
        volume: Option<f64>,

        /// Serving size label, e.g. "40g".
        #[arg(long, default_value = "1 serving")]
        serving: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Edit a food item. Editing a default item creates a custom copy.
    Edit {
        /// Item id.
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Category: gel, drink, or bar.
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(long)]
        protein: Option<f64>,

        #[arg(long)]
        sodium: Option<f64>,

        #[arg(long)]
        caffeine: Option<f64>,

        #[arg(long)]
        volume: Option<f64>,

        #[arg(long)]
        serving: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a user-added food item.
    Remove {
        /// Item id.
        id: String,
    },

    /// Merge a food library JSON file into the pantry.
    Import {
        /// Path to a food library JSON file.
        file: PathBuf,
    },
}

/// Race profile subcommands.
#[derive(Debug, Subcommand)]
pub enum RaceAction {
    /// List race profiles.
    List,

    /// Show the selected race profile.
    Show {
        /// Emit JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Create a new race from the template and select it.
    New {
        /// Name for the new race.
        #[arg(long)]
        name: Option<String>,
    },

    /// Select a race profile.
    Select {
        /// Profile id.
        id: String,
    },

    /// Reset the selected race to the template.
    Reset,

    /// Save the selected race, snapshotting a plan into history.
    Save,

    /// Import a race from a LiveTrail URL or a local feed file.
    Import {
        /// A LiveTrail runner-history URL or a path to a saved document.
        source: String,

        /// Force a document format instead of sniffing.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Override the race name derived from the URL.
        #[arg(long)]
        name: Option<String>,
    },
}

/// Aid station subcommands.
#[derive(Debug, Subcommand)]
pub enum StationAction {
    /// List the selected race's aid stations.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Add an aid station to the selected race.
    Add {
        #[arg(long)]
        name: Option<String>,

        /// Distance from the start, in the configured distance unit.
        #[arg(long)]
        distance: Option<f64>,

        /// Cumulative elevation gain in the configured elevation unit.
        #[arg(long)]
        elevation: Option<f64>,

        /// Elapsed time from the start, HH:MM:SS.
        #[arg(long)]
        time: Option<String>,
    },

    /// Edit an aid station. A time edit re-derives all later stations.
    Set {
        /// Station id.
        id: String,

        #[arg(long)]
        name: Option<String>,

        /// Distance from the start, in the configured distance unit.
        #[arg(long)]
        distance: Option<f64>,

        /// Cumulative elevation gain in the configured elevation unit.
        #[arg(long)]
        elevation: Option<f64>,

        /// Elapsed time from the start, HH:MM:SS.
        #[arg(long)]
        time: Option<String>,

        /// Treat --distance/--elevation as offsets from the previous
        /// station's value.
        #[arg(long)]
        delta: bool,
    },

    /// Remove an aid station from the selected race.
    Remove {
        /// Station id.
        id: String,
    },

    /// Assign a food item to a station.
    Assign {
        /// Station id.
        station: String,

        /// Food item id.
        item: String,

        /// How many servings to pick up.
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Remove a food assignment from a station.
    Unassign {
        /// Station id.
        station: String,

        /// Food item id.
        item: String,
    },
}

/// History subcommands.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List saved plans.
    List,

    /// Show one saved plan.
    Show {
        /// Plan id (the profile name it snapshots).
        id: String,

        /// Emit JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Remove a saved plan.
    Remove {
        /// Plan id.
        id: String,
    },
}

/// Settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show current display units.
    Show,

    /// Change display units.
    Set {
        /// Distance unit: km or mi.
        #[arg(long)]
        distance: Option<String>,

        /// Elevation unit: m or ft.
        #[arg(long)]
        elevation: Option<String>,

        /// Pace unit: min/km, min/mi, km/h, or mph.
        #[arg(long)]
        pace: Option<String>,

        /// Volume unit: ml or oz.
        #[arg(long)]
        volume: Option<String>,
    },
}
