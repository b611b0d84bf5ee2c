//! Shared server state and request errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::aggregate::Aggregator;

/// State shared by every request handler.
#[derive(Clone)]
pub struct ServerState {
    /// Aggregator used for every request
    pub aggregator: Aggregator,
}

impl ServerState {
    /// Wraps an aggregator for use by the handlers.
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }
}

/// A rejected request. Rendered as `400 {"detail": "..."}`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// `domains` missing, empty, or not a list
    #[error("domains must be a non-empty list")]
    InvalidDomains,

    /// A `domains` entry that is not a string
    #[error("domains must contain only strings")]
    NonStringDomain,

    /// `timeout` is zero, negative, or not a number
    #[error("timeout must be a positive integer")]
    InvalidTimeout,

    /// Upload without a `file` part
    #[error("missing multipart field 'file'")]
    MissingFile,

    /// Upload that could not be read
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// Upload with no domain entries
    #[error("No domains found in file")]
    NoDomainsInFile,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}
