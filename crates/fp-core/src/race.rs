//! Race recalculation: station ordering, time propagation, segment stats.
//!
//! The interesting piece is [`propagate_time_edit`]: when a user edits one
//! station's elapsed time, every station after it is re-derived from the
//! pace implied by the edited segment, so the rest of the plan stays
//! consistent with the new effort level.

use crate::model::AidStation;
use crate::timing::{self, TimeFormatError};

/// Per-segment statistics for one station.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDetails {
    /// Elapsed time since the previous station, `HH:MM:SS`.
    pub time_from_previous: String,
    /// Pace over the segment in minutes per kilometer.
    pub pace_min_per_km: f64,
}

/// Stable-sorts stations by distance from the start, ascending.
///
/// This is the canonical order for a profile's station list and must be
/// re-applied after every structural edit. It does not reconcile elevation
/// or time ordering when those disagree with the distance order.
pub fn sort_stations(stations: &mut [AidStation]) {
    stations.sort_by(|a, b| a.distance_from_start.total_cmp(&b.distance_from_start));
}

/// Applies a time edit to one station and re-derives every later station.
///
/// The edited station's time is set verbatim to `new_time`. Each station
/// after it (in the current array order; the slice is not re-sorted first)
/// gets a new time computed from the pace implied between the edited station
/// and itself at the new time. Stations before the edit are untouched. An
/// unknown `edited_id` leaves the slice unchanged.
///
/// A downstream station at the same distance as the edited one produces a
/// zero distance delta and hence a non-finite pace, which flows into the
/// formatted time unguarded.
pub fn propagate_time_edit(
    stations: &mut [AidStation],
    edited_id: &str,
    new_time: &str,
) -> Result<(), TimeFormatError> {
    let Some(edited_index) = stations.iter().position(|s| s.id == edited_id) else {
        return Ok(());
    };

    #[expect(clippy::cast_precision_loss, reason = "race durations are small")]
    let new_seconds = timing::parse_time(new_time)? as f64;
    let edited_distance = stations[edited_index].distance_from_start;
    stations[edited_index].estimated_time_from_start = new_time.to_string();

    for station in &mut stations[edited_index + 1..] {
        let distance_diff = station.distance_from_start - edited_distance;
        let pace = timing::pace_min_per_km(distance_diff, new_seconds);
        let time_diff = distance_diff * pace * 60.0;
        station.estimated_time_from_start = timing::format_time(new_seconds + time_diff);
    }
    Ok(())
}

/// Computes elapsed time and pace between station `index` and its
/// predecessor.
///
/// Index 0 is the defined base case: the first station has no segment, so
/// it reports zero time and zero pace. A zero-length segment produces a
/// non-finite pace, unguarded.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn segment_details(
    stations: &[AidStation],
    index: usize,
) -> Result<SegmentDetails, TimeFormatError> {
    if index == 0 {
        return Ok(SegmentDetails {
            time_from_previous: "00:00:00".to_string(),
            pace_min_per_km: 0.0,
        });
    }

    let current = &stations[index];
    let previous = &stations[index - 1];
    let distance_diff = current.distance_from_start - previous.distance_from_start;
    let time_diff = timing::parse_time(&current.estimated_time_from_start)?
        - timing::parse_time(&previous.estimated_time_from_start)?;

    #[expect(clippy::cast_precision_loss, reason = "race durations are small")]
    let time_diff = time_diff as f64;
    Ok(SegmentDetails {
        time_from_previous: timing::format_time(time_diff),
        pace_min_per_km: time_diff / (distance_diff * 60.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, distance: f64, time: &str) -> AidStation {
        AidStation {
            id: id.to_string(),
            name: id.to_string(),
            distance_from_start: distance,
            elevation_from_start: 0,
            current_elevation: None,
            estimated_time_from_start: time.to_string(),
            assistance_allowed: true,
            food_items: Vec::new(),
            notes: None,
        }
    }

    #[test]
    fn sort_orders_by_distance() {
        let mut stations = vec![
            station("b", 20.0, "02:00:00"),
            station("a", 0.0, "00:00:00"),
            station("c", 10.0, "01:00:00"),
        ];
        sort_stations(&mut stations);
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn sort_is_idempotent_and_preserves_elements() {
        let mut stations = vec![
            station("b", 20.0, "02:00:00"),
            station("a", 0.0, "00:00:00"),
            station("c", 10.0, "01:00:00"),
        ];
        sort_stations(&mut stations);
        let once = stations.clone();
        sort_stations(&mut stations);
        assert_eq!(stations, once);
        assert_eq!(stations.len(), 3);
    }

    #[test]
    fn sort_is_stable_for_equal_distances() {
        let mut stations = vec![
            station("first", 10.0, "01:00:00"),
            station("second", 10.0, "01:00:00"),
            station("start", 0.0, "00:00:00"),
        ];
        sort_stations(&mut stations);
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["start", "first", "second"]);
    }

    #[test]
    fn time_edit_rewrites_downstream_from_new_pace() {
        let mut stations = vec![
            station("start", 0.0, "00:00:00"),
            station("mid", 10.0, "01:00:00"),
            station("end", 20.0, "02:00:00"),
        ];
        propagate_time_edit(&mut stations, "mid", "02:00:00").unwrap();

        assert_eq!(stations[0].estimated_time_from_start, "00:00:00");
        assert_eq!(stations[1].estimated_time_from_start, "02:00:00");
        // Downstream time is re-derived from the edited segment's implied
        // pace, not left at its original 02:00:00.
        assert_eq!(stations[2].estimated_time_from_start, "04:00:00");
    }

    #[test]
    fn time_edit_leaves_earlier_stations_untouched() {
        let mut stations = vec![
            station("start", 0.0, "00:00:00"),
            station("mid", 10.0, "01:00:00"),
            station("end", 20.0, "02:00:00"),
        ];
        propagate_time_edit(&mut stations, "end", "03:00:00").unwrap();

        assert_eq!(stations[0].estimated_time_from_start, "00:00:00");
        assert_eq!(stations[1].estimated_time_from_start, "01:00:00");
        assert_eq!(stations[2].estimated_time_from_start, "03:00:00");
    }

    #[test]
    fn time_edit_unknown_id_is_a_no_op() {
        let mut stations = vec![station("start", 0.0, "00:00:00")];
        let before = stations.clone();
        propagate_time_edit(&mut stations, "missing", "09:00:00").unwrap();
        assert_eq!(stations, before);
    }

    #[test]
    fn time_edit_rejects_malformed_time() {
        let mut stations = vec![station("start", 0.0, "00:00:00")];
        assert!(propagate_time_edit(&mut stations, "start", "whenever").is_err());
    }

    #[test]
    fn segment_details_base_case() {
        let stations = vec![station("start", 0.0, "00:00:00")];
        let details = segment_details(&stations, 0).unwrap();
        assert_eq!(details.time_from_previous, "00:00:00");
        assert!((details.pace_min_per_km - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn segment_details_computes_delta_and_pace() {
        let stations = vec![
            station("start", 0.0, "00:00:00"),
            station("mid", 10.0, "01:00:00"),
            station("end", 20.0, "03:00:00"),
        ];
        let details = segment_details(&stations, 2).unwrap();
        assert_eq!(details.time_from_previous, "02:00:00");
        assert!((details.pace_min_per_km - 12.0).abs() < 1e-12);
    }

    #[test]
    fn segment_details_zero_distance_is_non_finite() {
        let stations = vec![
            station("a", 10.0, "01:00:00"),
            station("b", 10.0, "01:30:00"),
        ];
        let details = segment_details(&stations, 1).unwrap();
        assert!(details.pace_min_per_km.is_infinite());
    }
}
