//! HTTP transport abstraction.
//!
//! Provider adapters issue every request through [`HttpTransport`], which
//! never fails: network errors, HTTP errors and undecodable bodies all come
//! back as a [`TransportResponse`]. Production code uses [`ReqwestTransport`];
//! tests substitute a scripted fake.

mod http;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

pub use http::ReqwestTransport;

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL, without query string
    pub url: String,
    /// Extra request headers, in order
    pub headers: Vec<(String, String)>,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpRequest {
    /// Creates a request with no headers or query parameters.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            timeout,
        }
    }

    /// Appends a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Tri-state result of a GET: decoded body, error description, status.
///
/// - 2xx: `error` is `None`, whether or not the body decoded.
/// - non-2xx: `error` is `"HTTP <code>"`, `data` kept if the body decoded.
/// - no response at all: `status_code` is 0, `data` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// Body decoded as JSON, regardless of the declared content type
    pub data: Option<Value>,
    /// Failure description
    pub error: Option<String>,
    /// HTTP status, or 0 when the request never produced a response
    pub status_code: u16,
}

impl TransportResponse {
    /// Builds the response for a completed HTTP exchange.
    pub fn from_status(status_code: u16, data: Option<Value>) -> Self {
        let error = if (200..300).contains(&status_code) {
            None
        } else {
            Some(format!("HTTP {status_code}"))
        };
        Self {
            data,
            error,
            status_code,
        }
    }

    /// Builds the response for a request that never got an HTTP response.
    pub fn unreachable(description: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(description.into()),
            status_code: 0,
        }
    }

    /// True for 401 and 403 responses.
    pub fn is_auth_rejection(&self) -> bool {
        self.error.is_some() && matches!(self.status_code, 401 | 403)
    }
}

/// Best-effort JSON decoding of a response body.
pub fn decode_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}

/// Single HTTP GET primitive shared by all provider adapters.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the request. Never returns an error; see [`TransportResponse`].
    async fn get(&self, request: HttpRequest) -> TransportResponse;
}
