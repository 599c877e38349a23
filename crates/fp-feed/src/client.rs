//! HTTP client for fetching feed documents.
//!
//! The web client routed these fetches through a CORS relay; a native
//! client fetches directly. URL validation still happens before any
//! request goes out.

use crate::{FeedError, link};

/// Fetches LiveTrail feed documents.
#[derive(Debug, Clone, Default)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the URL and fetches the document body as text.
    pub async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        if !link::validate_feed_url(url) {
            return Err(FeedError::InvalidUrl(url.to_string()));
        }
        tracing::debug!(%url, "fetching feed document");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_urls_are_rejected_without_a_request() {
        let client = FeedClient::new();
        let err = client.fetch("https://example.com/feed").await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl(_)));
    }
}
