// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::config::{ApiConfig, AuthMethod};
use crate::error::ApiError;

/// HTTP client for backend operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    auth: AuthMethod,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client creation fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            auth: config.auth,
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(resp.url().path().to_string())),
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Err(ApiError::Auth(status.to_string()))
            }
            status => {
                let text = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response".to_string());
                Err(ApiError::Http(format!("{status}: {text}")))
            }
        }
    }
}
