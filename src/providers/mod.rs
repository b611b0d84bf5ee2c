//! Provider adapters.
//!
//! Each adapter turns the generic `fetch(domain, timeout)` contract into one
//! provider's endpoint, credential placement and response shape. Adapters
//! never return errors: a missing credential short-circuits into a failed
//! [`ProviderResult`] without touching the network, and HTTP problems are
//! reported inside the result.

mod auth;
mod builtwith;
mod mxtoolbox;
mod virustotal;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{Provider, ProviderResult};

pub use auth::{mxtoolbox_auth_attempts, run_auth_protocol, AuthAttempt};
pub use builtwith::BuiltWithAdapter;
pub use mxtoolbox::MxToolboxAdapter;
pub use virustotal::VirusTotalAdapter;

/// Fetches one provider's data for a domain.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider this adapter talks to.
    fn provider(&self) -> Provider;

    /// Queries the provider. Always produces a result.
    async fn fetch(&self, domain: &str, timeout: Duration) -> ProviderResult;
}
