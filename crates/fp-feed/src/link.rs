//! Feed URL validation and race-name extraction.

use url::Url;

/// Checks that a URL is a LiveTrail runner-history URL.
///
/// Accepted URLs have the `livetrail.net` host, a path under `/histo/`
/// containing the `/coureur.php` detail page, and a `rech` query
/// parameter. Anything else is rejected before any network call.
#[must_use]
pub fn validate_feed_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.host_str() == Some("livetrail.net")
        && parsed.path().starts_with("/histo/")
        && parsed.path().contains("/coureur.php")
        && parsed.query_pairs().any(|(key, _)| key == "rech")
}

/// Derives a display name from the path segment after `histo`.
///
/// The segment is split on underscores and each fragment title-cased.
/// Returns an empty string when the URL does not parse or the segment is
/// absent.
#[must_use]
pub fn extract_race_name(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let segments: Vec<&str> = parsed.path().split('/').collect();
    let Some(histo_index) = segments.iter().position(|s| *s == "histo") else {
        return String::new();
    };
    let Some(race_segment) = segments.get(histo_index + 1) else {
        return String::new();
    };
    race_segment
        .split('_')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character, leaving the rest as-is.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
