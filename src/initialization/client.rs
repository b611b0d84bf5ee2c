//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

/// Initializes the shared HTTP client used by every provider adapter.
///
/// Creates a `reqwest::Client` configured with:
/// - the given User-Agent header
/// - Rustls TLS backend (no native TLS)
///
/// No client-wide timeout is set: every request carries its own.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(user_agent: &str) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .use_rustls_tls()
        .user_agent(user_agent)
        .build()?;
    Ok(Arc::new(client))
}
