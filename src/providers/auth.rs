//! MXToolbox credential fallback protocol.
//!
//! MXToolbox accepts the API key in different places depending on account
//! and endpoint. The protocol is an ordered list of [`AuthAttempt`]s: the next
//! attempt runs only when the previous one was rejected with 401 or 403.
//! Any other outcome, success or failure, is final.

use std::time::Duration;

use log::debug;

use crate::config::{MxToolboxConfig, HEADER_X_API_KEY, PARAM_MXTOOLBOX_API_KEY};
use crate::transport::{HttpRequest, HttpTransport, TransportResponse};

/// Where one attempt places the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAttempt {
    /// Headers added to the request
    pub headers: Vec<(String, String)>,
    /// Query parameters added to the request
    pub query: Vec<(String, String)>,
}

impl AuthAttempt {
    fn header(name: &str, value: String) -> Self {
        Self {
            headers: vec![(name.to_string(), value)],
            query: Vec::new(),
        }
    }

    fn query(name: &str, value: String) -> Self {
        Self {
            headers: Vec::new(),
            query: vec![(name.to_string(), value)],
        }
    }

    fn build(&self, url: &str, timeout: Duration) -> HttpRequest {
        let mut request = HttpRequest::new(url, timeout);
        request.headers.extend(self.headers.iter().cloned());
        request.query.extend(self.query.iter().cloned());
        request
    }
}

/// The three MXToolbox attempts, in order:
/// `{auth_header}: {auth_scheme} {key}`, then `X-API-Key: {key}`, then `?apikey={key}`.
pub fn mxtoolbox_auth_attempts(config: &MxToolboxConfig, key: &str) -> Vec<AuthAttempt> {
    vec![
        AuthAttempt::header(
            &config.auth_header,
            format!("{} {}", config.auth_scheme, key),
        ),
        AuthAttempt::header(HEADER_X_API_KEY, key.to_string()),
        AuthAttempt::query(PARAM_MXTOOLBOX_API_KEY, key.to_string()),
    ]
}

/// Runs `attempts` strictly in sequence against `url`.
///
/// Returns the response of the last attempt made. With no attempts, returns a
/// transport-level failure without issuing a request.
pub async fn run_auth_protocol(
    transport: &dyn HttpTransport,
    url: &str,
    timeout: Duration,
    attempts: &[AuthAttempt],
) -> TransportResponse {
    let mut last = TransportResponse::unreachable("no authentication attempts configured");
    for (stage, attempt) in attempts.iter().enumerate() {
        last = transport.get(attempt.build(url, timeout)).await;
        if !last.is_auth_rejection() {
            break;
        }
        debug!(
            "Auth stage {} rejected for {} (HTTP {})",
            stage + 1,
            url,
            last.status_code
        );
    }
    last
}
