//! `reqwest`-backed transport.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{decode_body, HttpRequest, HttpTransport, TransportResponse};

/// Production transport sharing one `reqwest::Client` across all tasks.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Wraps a shared client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> TransportResponse {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let description = describe_error(e);
                debug!("GET {} failed: {}", request.url, description);
                return TransportResponse::unreachable(description);
            }
        };

        let status = response.status().as_u16();
        // Providers mislabel JSON, so the content type is not consulted.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let description = describe_error(e);
                debug!("Reading body of {} failed: {}", request.url, description);
                return TransportResponse::unreachable(description);
            }
        };

        debug!("GET {} -> {} ({} bytes)", request.url, status, body.len());
        TransportResponse::from_status(status, decode_body(&body))
    }
}

/// Describes a reqwest error without its URL, which may carry credentials
/// in the query string.
fn describe_error(error: reqwest::Error) -> String {
    let label = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "failed to read response body"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "request failed"
    };

    let error = error.without_url();
    let mut description = format!("{label}: {error}");
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
