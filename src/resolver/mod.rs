//! Upstream link-resolution client.
//!
//! Turns a TeraBox video ID into a direct download URL plus metadata by
//! calling one of the supported resolver APIs. The two upstreams speak
//! different JSON envelopes; [`ResolverSchema`] selects the adapter at
//! configuration time so the rest of the bot only ever sees a
//! [`Resolution`].

mod schema;

pub use schema::{parse_size, ResolverSchema};

use thiserror::Error;
use tracing::debug;
use url::Url;

/// Outcome of a successful resolution. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub download_url: String,
    pub file_name: Option<String>,
    pub size_bytes: u64,
}

/// Errors the resolver can surface.
///
/// `Upstream` carries the server-supplied message when the API returned a
/// failure envelope with one; everything else collapses to a generic
/// user-facing line at the handler.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    Upstream(Option<String>),

    #[error("upstream response did not include a download link")]
    MissingLink,
}

impl ResolveError {
    /// Text shown to the end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            ResolveError::Upstream(Some(msg)) => format!("❌ {msg}"),
            ResolveError::MissingLink => "❌ No download link found.".to_string(),
            _ => "❌ Failed to fetch video. Please check the link.".to_string(),
        }
    }
}

/// HTTP client for the configured resolver endpoint.
#[derive(Clone)]
pub struct ResolverClient {
    http: reqwest::Client,
    base_url: Url,
    schema: ResolverSchema,
}

impl ResolverClient {
    pub fn new(http: reqwest::Client, base_url: Url, schema: ResolverSchema) -> Self {
        Self {
            http,
            base_url,
            schema,
        }
    }

    /// Resolve a video ID into a download URL and metadata.
    ///
    /// One GET, no retries. The ID goes out as an encoded query parameter,
    /// so hostile input cannot reshape the request URL.
    pub async fn resolve(&self, video_id: &str) -> Result<Resolution, ResolveError> {
        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[("id", video_id)])
            .send()
            .await?;

        let body: serde_json::Value = response.json().await?;
        debug!("Resolver response for {}: {}", video_id, body);

        schema::decode(self.schema, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_per_error() {
        assert_eq!(
            ResolveError::MissingLink.user_message(),
            "❌ No download link found."
        );
        assert_eq!(
            ResolveError::Upstream(None).user_message(),
            "❌ Failed to fetch video. Please check the link."
        );
        assert_eq!(
            ResolveError::Upstream(Some("link expired".to_string())).user_message(),
            "❌ link expired"
        );
    }
}
