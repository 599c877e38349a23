//! Parser for the LiveTrail XML feed.

use std::collections::HashMap;

use fp_core::model::AidStation;
use roxmltree::Document;

use crate::{FeedError, ParsedFeed};

/// Parses the XML feed shape.
///
/// Checkpoints come from every `pt` element; passage times from `e`
/// elements directly under `pass`, matched by `idpt`. Attribute values that
/// are missing or unparseable fall back to defaults; a checkpoint with no
/// matching passage gets `00:00:00`.
pub fn parse_xml(document: &str) -> Result<ParsedFeed, FeedError> {
    let doc = Document::parse(document)?;

    // First passage per idpt wins.
    let mut passage_times: HashMap<&str, &str> = HashMap::new();
    for pass in doc.descendants().filter(|n| n.has_tag_name("pass")) {
        for e in pass.children().filter(|n| n.has_tag_name("e")) {
            let idpt = e.attribute("idpt").unwrap_or("");
            let tps = e.attribute("tps").unwrap_or("00:00:00");
            passage_times.entry(idpt).or_insert(tps);
        }
    }

    let checkpoints: Vec<AidStation> = doc
        .descendants()
        .filter(|n| n.has_tag_name("pt"))
        .enumerate()
        .map(|(index, pt)| {
            let idpt = pt.attribute("idpt").unwrap_or("");
            let time = passage_times.get(idpt).copied().unwrap_or("00:00:00");
            AidStation {
                id: format!("station-{index}"),
                name: pt.attribute("n").unwrap_or("").to_string(),
                distance_from_start: parse_or_default(pt.attribute("km")),
                elevation_from_start: parse_or_default(pt.attribute("d")),
                current_elevation: Some(parse_or_default(pt.attribute("a"))),
                estimated_time_from_start: time.to_string(),
                assistance_allowed: true,
                food_items: Vec::new(),
                notes: None,
            }
        })
        .collect();

    let Some(last) = checkpoints.last() else {
        return Err(FeedError::NoTimingPoints);
    };

    Ok(ParsedFeed {
        total_distance: last.distance_from_start,
        total_elevation_gain: last.elevation_from_start,
        checkpoints,
    })
}

/// Parses an attribute value, defaulting when absent or unparseable.
fn parse_or_default<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}
