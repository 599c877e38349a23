//! `fp plan`: the computed nutrition table for the selected race.

use std::fmt::Write;

use anyhow::Result;
use fp_core::guidance::{self, Metric};
use fp_core::nutrition::{NutritionPoint, ViewMode};
use fp_core::state::Settings;
use fp_core::{MetricTotals, calculate_nutrition, race_averages};

use crate::app::App;

pub fn run(app: &App, view: ViewMode, json: bool, averages: bool) -> Result<()> {
    let profile = app.selected_profile()?;
    let pantry = app.pantry.all_items();
    let rows = calculate_nutrition(&profile.aid_stations, &pantry, view)?;

    if json {
        if averages {
            let payload = serde_json::json!({
                "rows": rows,
                "averages": race_averages(&rows),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        return Ok(());
    }

    print!("{}", format_rows(&rows, &app.settings));
    if averages {
        println!();
        print!("{}", format_averages(&race_averages(&rows)));
    }
    Ok(())
}

/// Renders totals and hourly rates, one row per station (or segment).
fn format_rows(rows: &[NutritionPoint], settings: &Settings) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "{:<36} {:>9} {:>6} {:>6} {:>6} {:>8} {:>7} {:>8}",
        "STATION", "TIME", "KCAL", "CARBS", "PROT", "SODIUM", "CAFF", "FLUID"
    )
    .unwrap();
    for row in rows {
        writeln!(output, "{}", format_metric_row(row, &row.totals, settings)).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "PER HOUR").unwrap();
    for row in rows {
        writeln!(output, "{}", format_metric_row(row, &row.per_hour, settings)).unwrap();
    }
    output
}

fn format_metric_row(row: &NutritionPoint, totals: &MetricTotals, settings: &Settings) -> String {
    format!(
        "{:<36} {:>9} {:>6.0} {:>5.0}g {:>5.0}g {:>6.0}mg {:>5.0}mg {:>8}",
        row.display_name,
        row.time_from_start,
        totals.calories,
        totals.carbs,
        totals.protein,
        totals.sodium,
        totals.caffeine,
        super::display_volume(totals.volume, settings),
    )
}

/// Renders race-average hourly rates with their guidance bands.
fn format_averages(averages: &MetricTotals) -> String {
    let mut output = String::new();
    writeln!(output, "RACE AVERAGES").unwrap();
    for metric in Metric::ALL {
        let rate = metric.of(averages);
        match guidance::assess(metric, rate) {
            Some(band) => writeln!(
                output,
                "  {:<10} {:>7.1} {:<7} {:<2} {}",
                metric.as_str(),
                rate,
                metric.rate_unit(),
                band.rating.marker(),
                band.note,
            )
            .unwrap(),
            None => writeln!(
                output,
                "  {:<10} {:>7.1} {:<7}",
                metric.as_str(),
                rate,
                metric.rate_unit(),
            )
            .unwrap(),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::seed;

    fn rows() -> Vec<NutritionPoint> {
        let mut profile = seed::utmb_template();
        for station in &mut profile.aid_stations {
            station.food_items.push(fp_core::FoodAssignment {
                item_id: "maurten-gel-100".to_string(),
                count: 1,
            });
        }
        calculate_nutrition(
            &profile.aid_stations,
            &seed::default_food_items(),
            ViewMode::SinceStart,
        )
        .unwrap()
    }

    #[test]
    fn format_rows_has_totals_and_rate_sections() {
        let rendered = format_rows(&rows(), &Settings::default());
        assert!(rendered.contains("PER HOUR"));
        assert!(rendered.contains("Courmayeur"));
        // One header, one row per station, a blank line, a section title,
        // and the rate rows.
        assert_eq!(rendered.lines().count(), 6 * 2 + 3);
    }

    #[test]
    fn format_averages_snapshot() {
        let averages = MetricTotals {
            calories: 300.0,
            carbs: 60.0,
            protein: 5.0,
            sodium: 600.0,
            volume: 600.0,
            caffeine: 40.0,
        };
        insta::assert_snapshot!(format_averages(&averages), @r"
        RACE AVERAGES
          carbs         60.0 g/h     ok good range for stable energy; elites go 60-90g/hour with gut training
          calories     300.0 kcal/h  ok generally optimal for sustaining long efforts
          protein        5.0 g/h     ok 5-10g/hour helps prevent muscle breakdown on efforts over three hours
          sodium       600.0 mg/h    ok ideal for most, maintains electrolyte balance
          volume       600.0 ml/h    ok common sweet spot to match sweat rate
          caffeine      40.0 mg/h    ok highly individual, test your tolerance before race day
        ");
    }

    #[test]
    fn format_averages_includes_guidance_notes() {
        let averages = race_averages(&rows());
        let rendered = format_averages(&averages);
        assert!(rendered.contains("RACE AVERAGES"));
        assert!(rendered.contains("carbs"));
        assert!(rendered.contains("g/h"));
    }
}
