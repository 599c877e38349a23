//! Parser for the LiveTrail HTML detail page.
//!
//! The page does not publish distances directly; each row carries an
//! average speed and an elapsed time, and the cumulative distance is their
//! product. That derivation is kept as-is, at full float precision.

use fp_core::model::AidStation;
use fp_core::timing;
use scraper::{ElementRef, Html, Selector};

use crate::{FeedError, ParsedFeed};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

fn sub_text(
    cell: ElementRef<'_>,
    sel: &Selector,
    field: &'static str,
    row: usize,
) -> Result<String, FeedError> {
    let element = cell
        .select(sel)
        .next()
        .ok_or(FeedError::MissingField { field, row })?;
    Ok(element.text().collect::<String>())
}

/// Parses the HTML table shape.
///
/// Structure is mandatory: the `tpass` table, five cells per row, and the
/// `.rig`/`a` sub-elements must exist. Values inside them are optional and
/// default (an empty time text means `00:00:00`).
pub fn parse_html(document: &str) -> Result<ParsedFeed, FeedError> {
    let table_sel = selector(".tpass");
    let row_sel = selector("tr");
    let cell_sel = selector("td");
    let rig_sel = selector(".rig");
    let anchor_sel = selector("a");

    let doc = Html::parse_document(document);
    let table = doc
        .select(&table_sel)
        .next()
        .ok_or(FeedError::MissingTable)?;

    // Everything but the header row is a data row.
    let rows: Vec<ElementRef<'_>> = table.select(&row_sel).skip(1).collect();
    if rows.is_empty() {
        return Err(FeedError::NoTimingPoints);
    }

    let mut checkpoints = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.len() < 5 {
            return Err(FeedError::InvalidRow { row: index });
        }

        let elevation_text = sub_text(cells[0], &rig_sel, "elevation", index)?;
        let elevation: i32 = strip_non_digits(&elevation_text).parse().unwrap_or(0);

        let name = sub_text(cells[0], &anchor_sel, "name", index)?;

        let mut time = sub_text(cells[4], &rig_sel, "time", index)?.trim().to_string();
        if time.is_empty() {
            time = "00:00:00".to_string();
        }

        let speed_text = sub_text(cells[1], &rig_sel, "speed", index)?;
        let speed_kmh: f64 = strip_non_numeric(&speed_text).parse().unwrap_or(0.0);

        // Cumulative distance derived from speed and elapsed time, at full
        // float precision.
        let distance = speed_kmh * timing::time_to_hours(&time)?;

        let gain: i32 = row
            .value()
            .attr("d")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        checkpoints.push(AidStation {
            id: format!("station-{index}"),
            name,
            distance_from_start: distance,
            elevation_from_start: gain,
            current_elevation: Some(elevation),
            estimated_time_from_start: time,
            assistance_allowed: true,
            food_items: Vec::new(),
            notes: None,
        });
    }

    let last = checkpoints
        .last()
        .unwrap_or_else(|| unreachable!("rows is non-empty"));
    Ok(ParsedFeed {
        total_distance: last.distance_from_start,
        total_elevation_gain: last.elevation_from_start,
        checkpoints,
    })
}

fn strip_non_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn strip_non_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            "<html><body><table class=\"tpass\">\
             <tr><th>Point</th><th>Speed</th><th>A</th><th>B</th><th>Time</th></tr>\
             {rows}\
             </table></body></html>"
        )
    }

    const ROW_TEMPLATE: &str = r##"<tr d="1400">
        <td><a href="#">Les Contamines</a><span class="rig">1162 m</span></td>
        <td><span class="rig">7.5 km/h</span></td>
        <td>x</td>
        <td>x</td>
        <td><span class="rig">04:00:00</span></td>
    </tr>"##;

    #[test]
    fn parses_a_data_row() {
        let feed = parse_html(&page(ROW_TEMPLATE)).unwrap();
        assert_eq!(feed.checkpoints.len(), 1);

        let checkpoint = &feed.checkpoints[0];
        assert_eq!(checkpoint.id, "station-0");
        assert_eq!(checkpoint.name, "Les Contamines");
        assert_eq!(checkpoint.current_elevation, Some(1162));
        assert_eq!(checkpoint.estimated_time_from_start, "04:00:00");
        assert_eq!(checkpoint.elevation_from_start, 1400);
        // 7.5 km/h over four hours.
        assert!((checkpoint.distance_from_start - 30.0).abs() < 1e-9);
        assert!((feed.total_distance - 30.0).abs() < 1e-9);
        assert_eq!(feed.total_elevation_gain, 1400);
    }

    #[test]
    fn missing_table_fails() {
        let err = parse_html("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, FeedError::MissingTable));
    }

    #[test]
    fn header_only_table_has_no_timing_points() {
        let err = parse_html(&page("")).unwrap_err();
        assert!(matches!(err, FeedError::NoTimingPoints));
    }

    #[test]
    fn short_row_is_invalid() {
        let err = parse_html(&page("<tr><td>only</td><td>two</td></tr>")).unwrap_err();
        assert!(matches!(err, FeedError::InvalidRow { row: 0 }));
    }

    #[test]
    fn missing_structure_is_a_hard_failure() {
        // No `.rig` in the first cell: elevation container missing.
        let row = r##"<tr>
            <td><a href="#">Name</a></td>
            <td><span class="rig">7.5</span></td>
            <td>x</td><td>x</td>
            <td><span class="rig">01:00:00</span></td>
        </tr>"##;
        let err = parse_html(&page(row)).unwrap_err();
        assert!(matches!(
            err,
            FeedError::MissingField {
                field: "elevation",
                row: 0
            }
        ));
    }

    #[test]
    fn empty_time_text_defaults() {
        let row = r##"<tr>
            <td><a href="#">Start</a><span class="rig">1043 m</span></td>
            <td><span class="rig">0</span></td>
            <td>x</td><td>x</td>
            <td><span class="rig"> </span></td>
        </tr>"##;
        let feed = parse_html(&page(row)).unwrap();
        assert_eq!(feed.checkpoints[0].estimated_time_from_start, "00:00:00");
        assert!((feed.checkpoints[0].distance_from_start - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_gain_attribute_defaults_to_zero() {
        let row = r##"<tr>
            <td><a href="#">Start</a><span class="rig">1043</span></td>
            <td><span class="rig">10.0</span></td>
            <td>x</td><td>x</td>
            <td><span class="rig">02:30:00</span></td>
        </tr>"##;
        let feed = parse_html(&page(row)).unwrap();
        assert_eq!(feed.checkpoints[0].elevation_from_start, 0);
        assert!((feed.checkpoints[0].distance_from_start - 25.0).abs() < 1e-9);
    }
}
