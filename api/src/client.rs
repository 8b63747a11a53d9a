// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar backend client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{EventDraft, EventId, EventRecord, UserRecord};

/// Operations the calendar backend offers to the client.
#[async_trait]
pub trait CalendarApi {
    /// Creates a new event owned by `username`.
    async fn create_event(
        &self,
        username: &str,
        draft: &EventDraft,
    ) -> Result<EventRecord, ApiError>;

    /// Replaces the event `id` owned by `username`.
    async fn update_event(
        &self,
        username: &str,
        id: &EventId,
        draft: &EventDraft,
    ) -> Result<EventRecord, ApiError>;

    /// Fetches the user record, including their events.
    async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError>;
}

/// HTTP implementation of [`CalendarApi`].
///
/// # Example
///
/// ```ignore
/// use calclient_api::{ApiClient, ApiConfig, CalendarApi};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiConfig {
///     base_url: "https://calendar.example.com/api".to_string(),
///     ..Default::default()
/// };
///
/// let client = ApiClient::new(config)?;
/// let user = client.get_user("alice").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Arc<HttpClient>,
}

impl ApiClient {
    /// Creates a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }
}

#[async_trait]
impl CalendarApi for ApiClient {
    #[tracing::instrument(skip(self, draft))]
    async fn create_event(
        &self,
        username: &str,
        draft: &EventDraft,
    ) -> Result<EventRecord, ApiError> {
        let url = self.http.url(&["users", username, "events"]);
        let resp = self
            .http
            .execute(self.http.build_request(Method::POST, url).json(draft))
            .await?;
        decode(resp).await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn update_event(
        &self,
        username: &str,
        id: &EventId,
        draft: &EventDraft,
    ) -> Result<EventRecord, ApiError> {
        let url = self.http.url(&["users", username, "events", id.as_str()]);
        let resp = self
            .http
            .execute(self.http.build_request(Method::PUT, url).json(draft))
            .await?;
        decode(resp).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
        let url = self.http.url(&["users", username]);
        let resp = self
            .http
            .execute(self.http.build_request(Method::GET, url))
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::debug!(%e, body = %text, "failed to decode response body");
        ApiError::InvalidResponse(e.to_string())
    })
}
