//! LiveTrail timing-feed integration.
//!
//! LiveTrail publishes the same runner history in two shapes: a compact XML
//! document (`pt` elements for checkpoints, `pass > e` elements for passage
//! times) and an HTML detail page carrying a `tpass` table. Both parse into
//! the same [`ParsedFeed`]: an ordered checkpoint list plus trip totals,
//! ready to become a race profile.
//!
//! Feeds are scraped from a third party, so both parsers are tolerant of
//! missing values (they default) but strict about missing structure (they
//! fail).

mod client;
mod html;
mod link;
mod xml;

use fp_core::model::AidStation;
use thiserror::Error;

pub use client::FeedClient;
pub use link::{extract_race_name, validate_feed_url};

/// Errors raised while validating, fetching, or parsing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The document is not well-formed XML.
    #[error("malformed feed document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document contains no timing points.
    #[error("No timing points found")]
    NoTimingPoints,

    /// The HTML page has no timing points table.
    #[error("Could not find timing points table")]
    MissingTable,

    /// A table row has fewer cells than the format requires.
    #[error("invalid row format at row {row}")]
    InvalidRow { row: usize },

    /// A required sub-element of a table row is absent.
    #[error("{field} not found at row {row}")]
    MissingField { field: &'static str, row: usize },

    /// A passage time string could not be parsed.
    #[error(transparent)]
    Time(#[from] fp_core::TimeFormatError),

    /// The URL is not an acceptable LiveTrail runner-history URL.
    #[error("not a LiveTrail runner history URL: {0}")]
    InvalidUrl(String),

    /// The fetch itself failed.
    #[error("feed fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("feed fetch returned status {0}")]
    Status(u16),
}

/// A parsed feed: checkpoints in document order plus trip totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub checkpoints: Vec<AidStation>,
    /// Kilometers; the last checkpoint's distance.
    pub total_distance: f64,
    /// Meters; the last checkpoint's cumulative gain.
    pub total_elevation_gain: i32,
}

/// The two feed document shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Xml,
    Html,
}

impl FeedFormat {
    /// Parses a document as this format.
    pub fn parse(self, document: &str) -> Result<ParsedFeed, FeedError> {
        match self {
            Self::Xml => xml::parse_xml(document),
            Self::Html => html::parse_html(document),
        }
    }
}

/// Guesses the format of a feed document.
///
/// The HTML pages always carry the `tpass` table class and an `<html>`
/// element; anything else is treated as the XML feed.
#[must_use]
pub fn sniff_format(document: &str) -> FeedFormat {
    let head: String = document
        .chars()
        .take(1024)
        .collect::<String>()
        .to_ascii_lowercase();
    if head.contains("<html") || head.contains("<!doctype html") || document.contains("tpass") {
        FeedFormat::Html
    } else {
        FeedFormat::Xml
    }
}

/// Sniffs the document format and parses it.
pub fn parse_feed(document: &str) -> Result<ParsedFeed, FeedError> {
    let format = sniff_format(document);
    tracing::debug!(?format, bytes = document.len(), "parsing feed document");
    format.parse(document)
}
