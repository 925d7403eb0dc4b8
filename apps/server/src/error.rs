// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Search history store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Pokemon lookup failed: {0}")]
    LookupFailed(String),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::StoreUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
            ApiError::LookupFailed(_) => (StatusCode::BAD_GATEWAY, "LOOKUP_FAILED"),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<pokedex_core::Error> for ApiError {
    fn from(err: pokedex_core::Error) -> Self {
        match err {
            pokedex_core::Error::InvalidSearch(msg) => ApiError::BadRequest(msg),
            pokedex_core::Error::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            pokedex_core::Error::LookupFailed(msg) => ApiError::LookupFailed(msg),
        }
    }
}
