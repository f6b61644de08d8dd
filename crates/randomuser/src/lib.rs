//! # randomuser
//!
//! Thin async client for the public [randomuser.me](https://randomuser.me)
//! API, used to fetch random profile photos for practitioners and clients.
//!
//! Only the picture field is requested (`?inc=picture`) to keep responses
//! small. There is no retry policy: a fetch either succeeds or the caller
//! falls back to registering the record without a photo.

use serde::Deserialize;
use std::time::Duration;

/// Base URL of the public API.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the random-user API client.
#[derive(Debug, thiserror::Error)]
pub enum RandomUserError {
    #[error("request to the random-user API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("random-user response contained no portrait")]
    MissingPortrait,
}

/// Response shape of `GET /api/?inc=picture`.
#[derive(Debug, Deserialize)]
struct RandomUserResponse {
    results: Vec<UserResult>,
}

#[derive(Debug, Deserialize)]
struct UserResult {
    picture: UserPicture,
}

/// The picture URLs the API returns per generated user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPicture {
    /// High-resolution portrait.
    pub large: String,
    pub medium: String,
    pub thumbnail: String,
}

/// Client for the randomuser.me API.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    http: reqwest::Client,
    base_url: String,
}

impl RandomUserClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns [`RandomUserError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new() -> Result<Self, RandomUserError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (for tests and mirrors).
    ///
    /// # Errors
    ///
    /// Returns [`RandomUserError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RandomUserError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetches one random portrait and returns the high-resolution URL.
    ///
    /// # Errors
    ///
    /// Returns [`RandomUserError::Http`] on transport or status failures and
    /// [`RandomUserError::MissingPortrait`] if the response carried no
    /// results.
    pub async fn portrait_url(&self) -> Result<String, RandomUserError> {
        let url = format!("{}/api/", self.base_url.trim_end_matches('/'));

        let response: RandomUserResponse = self
            .http
            .get(&url)
            .query(&[("inc", "picture")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let picture = response
            .results
            .into_iter()
            .next()
            .map(|result| result.picture)
            .ok_or(RandomUserError::MissingPortrait)?;

        tracing::debug!("fetched portrait {}", picture.large);
        Ok(picture.large)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Captured from the live API (picture field only).
    const SAMPLE: &str = r#"{
        "results": [
            {
                "picture": {
                    "large": "https://randomuser.me/api/portraits/women/63.jpg",
                    "medium": "https://randomuser.me/api/portraits/med/women/63.jpg",
                    "thumbnail": "https://randomuser.me/api/portraits/thumb/women/63.jpg"
                }
            }
        ],
        "info": {"seed": "c5d8a0f1b3e2", "results": 1, "page": 1, "version": "1.4"}
    }"#;

    #[test]
    fn test_response_deserializes_from_live_shape() {
        let response: RandomUserResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(
            response.results[0].picture.large,
            "https://randomuser.me/api/portraits/women/63.jpg"
        );
    }

    #[test]
    fn test_empty_results_deserialize() {
        let response: RandomUserResponse =
            serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
