//! BuiltWith technology lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::ProviderAdapter;
use crate::config::{
    BuiltWithConfig, ENV_BUILTWITH_API_KEY, PARAM_BUILTWITH_KEY, PARAM_BUILTWITH_LOOKUP,
};
use crate::models::{FetchOutcome, Provider, ProviderResult};
use crate::transport::{HttpRequest, HttpTransport};

/// Single GET against the BuiltWith domain API, key passed as a query parameter.
pub struct BuiltWithAdapter {
    config: BuiltWithConfig,
    transport: Arc<dyn HttpTransport>,
}

impl BuiltWithAdapter {
    /// Creates an adapter; a missing API key is reported per fetch.
    pub fn new(config: BuiltWithConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl ProviderAdapter for BuiltWithAdapter {
    fn provider(&self) -> Provider {
        Provider::BuiltWith
    }

    async fn fetch(&self, domain: &str, timeout: Duration) -> ProviderResult {
        let Some(key) = self.config.api_key.as_deref() else {
            return ProviderResult::missing_credential(Provider::BuiltWith, ENV_BUILTWITH_API_KEY);
        };

        let request = HttpRequest::new(&self.config.api_base, timeout)
            .query(PARAM_BUILTWITH_KEY, key)
            .query(PARAM_BUILTWITH_LOOKUP, domain);

        debug!("BuiltWith lookup for {}", domain);
        let response = self.transport.get(request).await;
        // The endpoint is reported without the query string to keep the key out.
        ProviderResult::from_outcome(
            Provider::BuiltWith,
            FetchOutcome::from_response(response, self.config.api_base.as_str()),
        )
    }
}
