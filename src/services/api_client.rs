// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the sports API.
//!
//! Maps each store operation to one request:
//! - `GET  /api/players`, `POST /api/players`
//! - `GET  /api/matches`, `POST /api/matches`
//! - `POST /api/matches/{id}/goals`, `DELETE /api/matches/{id}/goals/{playerId}?team=`
//! - `POST /api/matches/{id}/complete`
//!
//! There is no retry, timeout, or cancellation; a failed request surfaces
//! as an error to the caller.

use crate::config::Config;
use crate::error::{AppError, ErrorResponse, Result};
use crate::models::{AddGoalCommand, CreateMatchCommand, CreatePlayerCommand, Match, Player};
use crate::services::SportsBackend;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};

/// Sports API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn match_url(&self, match_id: &str, suffix: &str) -> String {
        format!(
            "{}/api/matches/{}{}",
            self.base_url,
            urlencoding::encode(match_id),
            suffix
        )
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::RemoteApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Generic POST request with JSON body and response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::RemoteApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    ///
    /// Client errors reported by the API come back as the matching
    /// `AppError` variant; everything else is a `RemoteApi` failure.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AppError::RemoteApi(format!("JSON parse error: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        let details = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .map(|e| e.details.unwrap_or(e.error))
            .unwrap_or_else(|| body.clone());

        tracing::warn!(status = %status, details = %details, "Sports API request failed");

        Err(match status {
            StatusCode::NOT_FOUND => AppError::NotFound(details),
            StatusCode::BAD_REQUEST => AppError::BadRequest(details),
            StatusCode::CONFLICT => AppError::Conflict(details),
            _ => AppError::RemoteApi(format!("HTTP {}: {}", status, details)),
        })
    }
}

impl SportsBackend for ApiClient {
    async fn list_players(&self) -> Result<Vec<Player>> {
        let url = format!("{}/api/players", self.base_url);
        self.get_json(&url).await
    }

    async fn create_player(&self, command: &CreatePlayerCommand) -> Result<Player> {
        let url = format!("{}/api/players", self.base_url);
        self.post_json(&url, command).await
    }

    async fn list_matches(&self) -> Result<Vec<Match>> {
        let url = format!("{}/api/matches", self.base_url);
        self.get_json(&url).await
    }

    async fn create_match(&self, command: &CreateMatchCommand) -> Result<Match> {
        let url = format!("{}/api/matches", self.base_url);
        self.post_json(&url, command).await
    }

    async fn add_goal(&self, match_id: &str, command: &AddGoalCommand) -> Result<Match> {
        let url = self.match_url(match_id, "/goals");
        self.post_json(&url, command).await
    }

    async fn remove_goal(&self, match_id: &str, team: &str, player_id: &str) -> Result<Match> {
        let url = self.match_url(
            match_id,
            &format!("/goals/{}", urlencoding::encode(player_id)),
        );
        tracing::debug!(url = %url, team, "DELETE");

        let response = self
            .http
            .delete(&url)
            .query(&[("team", team)])
            .send()
            .await
            .map_err(|e| AppError::RemoteApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    async fn complete_match(&self, match_id: &str) -> Result<Match> {
        let url = self.match_url(match_id, "/complete");
        self.post_json(&url, &serde_json::json!({})).await
    }
}
