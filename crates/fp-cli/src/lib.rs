//! Command-line interface for the fueling planner.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;

pub use app::App;
pub use cli::{
    Cli, Commands, FormatArg, HistoryAction, PantryAction, RaceAction, SettingsAction,
    StationAction, ViewArg,
};
pub use config::Config;
