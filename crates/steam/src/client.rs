//! Steam Web API client.
//!
//! Async HTTP client using `reqwest`; the API key travels as a query
//! parameter, which is how the Web API authenticates.

use crate::types::{ApiEnvelope, RecentGames};

const DEFAULT_BASE_URL: &str = "http://api.steampowered.com";

const RECENTLY_PLAYED_PATH: &str = "/IPlayerService/GetRecentlyPlayedGames/v0001/";

/// Errors from the Steam Web API client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

/// Steam Web API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Fetches the account's recently played games list.
    pub async fn get_recently_played(
        &self,
        steam_id: &str,
        api_key: &str,
    ) -> Result<RecentGames, FetchError> {
        let url = format!("{}{}", self.base_url, RECENTLY_PLAYED_PATH);
        tracing::debug!(steam_id, "fetching recently played games");

        let resp = self
            .http
            .get(&url)
            .query(&[("key", api_key), ("steamid", steam_id), ("format", "json")])
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)?;
        envelope
            .response
            .ok_or(FetchError::Malformed("missing response object"))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
