//! VirusTotal domain report.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::ProviderAdapter;
use crate::config::{VirusTotalConfig, ENV_VIRUSTOTAL_API_KEY, HEADER_VT_API_KEY};
use crate::models::{FetchOutcome, Provider, ProviderResult};
use crate::transport::{HttpRequest, HttpTransport};

/// Single GET of `{base}/domains/{domain}` authenticated with `x-apikey`.
pub struct VirusTotalAdapter {
    config: VirusTotalConfig,
    transport: Arc<dyn HttpTransport>,
}

impl VirusTotalAdapter {
    /// Creates an adapter; a missing API key is reported per fetch.
    pub fn new(config: VirusTotalConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl ProviderAdapter for VirusTotalAdapter {
    fn provider(&self) -> Provider {
        Provider::VirusTotal
    }

    async fn fetch(&self, domain: &str, timeout: Duration) -> ProviderResult {
        let Some(key) = self.config.api_key.as_deref() else {
            return ProviderResult::missing_credential(
                Provider::VirusTotal,
                ENV_VIRUSTOTAL_API_KEY,
            );
        };

        let url = format!("{}/domains/{}", self.config.base_url, domain);
        let request = HttpRequest::new(url.as_str(), timeout).header(HEADER_VT_API_KEY, key);

        debug!("VirusTotal lookup for {}", domain);
        let response = self.transport.get(request).await;
        ProviderResult::from_outcome(
            Provider::VirusTotal,
            FetchOutcome::from_response(response, url),
        )
    }
}
