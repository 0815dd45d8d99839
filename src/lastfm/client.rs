//! Last.fm API client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::models::{RecentTracksResponse, TopArtistsResponse, UserInfoResponse};
use super::{TopArtist, Track, UserInfo};

const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Read-only client for the audioscrobbler web API.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl LastFmClient {
    /// Creates a new Last.fm API client.
    ///
    /// `base_url` overrides the audioscrobbler endpoint; pass `None` for the
    /// real service.
    pub fn new(
        api_key: String,
        user_agent: &str,
        base_url: Option<String>,
    ) -> Result<Self, LastFmError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .build()?;
        debug!(base_url = %base_url, "initialized Last.fm client");
        Ok(Self {
            api_key,
            client,
            base_url,
        })
    }

    /// Fetch profile info for a user (`user.getinfo`).
    pub async fn get_user_info(&self, user: &str) -> Result<UserInfo, LastFmError> {
        let params = [("method", "user.getinfo"), ("user", user)];
        let response: UserInfoResponse = self.get(&params).await?;
        Ok(response.into_user_info())
    }

    /// Fetch the most recent tracks, newest first (`user.getrecenttracks`).
    ///
    /// When the account is listening right now, the live track is prepended
    /// and carries the now-playing marker.
    pub async fn get_recent_tracks(
        &self,
        user: &str,
        limit: u32,
    ) -> Result<Vec<Track>, LastFmError> {
        let limit = limit.to_string();
        let params = [
            ("method", "user.getrecenttracks"),
            ("user", user),
            ("limit", &limit),
        ];
        let response: RecentTracksResponse = self.get(&params).await?;
        Ok(response.into_tracks())
    }

    /// Fetch the ranked top-artists chart (`user.gettopartists`).
    pub async fn get_top_artists(
        &self,
        user: &str,
        limit: u32,
    ) -> Result<Vec<TopArtist>, LastFmError> {
        let limit = limit.to_string();
        let params = [
            ("method", "user.gettopartists"),
            ("user", user),
            ("limit", &limit),
        ];
        let response: TopArtistsResponse = self.get(&params).await?;
        Ok(response.into_artists())
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, LastFmError> {
        let method = params
            .first()
            .map(|(_, method)| *method)
            .unwrap_or_default();
        debug!(method, "fetching from Last.fm");

        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let value = parse_body(status, &body)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Check HTTP status and the in-body Last.fm error object before decoding.
fn parse_body(status: StatusCode, body: &str) -> Result<Value, LastFmError> {
    if !status.is_success() {
        return Err(LastFmError::HttpStatus {
            status,
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body)?;
    if let Some(code) = value.get("error").and_then(|v| v.as_i64()) {
        let message = value
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown Last.fm error")
            .to_string();
        return Err(LastFmError::Api { code, message });
    }

    Ok(value)
}
