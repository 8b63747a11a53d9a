// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Calendar backend client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication rejected by the backend.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}
