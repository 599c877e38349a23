//! `fp settings`: display unit preferences.

use anyhow::Result;

use crate::app::App;
use crate::cli::SettingsAction;

pub fn run(app: &mut App, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            show(app);
            Ok(())
        }
        SettingsAction::Set {
            distance,
            elevation,
            pace,
            volume,
        } => {
            if let Some(unit) = distance {
                app.settings.distance_unit = unit.parse()?;
            }
            if let Some(unit) = elevation {
                app.settings.elevation_unit = unit.parse()?;
            }
            if let Some(unit) = pace {
                app.settings.pace_unit = unit.parse()?;
            }
            if let Some(unit) = volume {
                app.settings.volume_unit = unit.parse()?;
            }
            app.save_settings()?;
            show(app);
            Ok(())
        }
    }
}

fn show(app: &App) {
    let settings = &app.settings;
    println!("distance   {}", settings.distance_unit);
    println!("elevation  {}", settings.elevation_unit);
    println!("pace       {}", settings.pace_unit);
    println!("volume     {}", settings.volume_unit);
}
