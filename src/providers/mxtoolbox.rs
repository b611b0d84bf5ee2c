//! MXToolbox DNS and mail-security lookups.
//!
//! One domain fans out to every configured sub-tool (`dns`, `spf`, `dmarc`,
//! ...). Each tool request runs the credential fallback protocol on its own,
//! and the outcomes are merged into a single tool map.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use super::auth::{mxtoolbox_auth_attempts, run_auth_protocol, AuthAttempt};
use super::ProviderAdapter;
use crate::config::{MxToolboxConfig, ENV_MXTOOLBOX_API_KEY, MAX_CONCURRENT_TOOLS};
use crate::models::{FetchOutcome, MxToolboxData, Provider, ProviderResult};
use crate::transport::{HttpTransport, TransportResponse};
use crate::utils::{describe_join_error, run_bounded};

/// Concurrent sub-tool lookups, merged into one result.
pub struct MxToolboxAdapter {
    config: MxToolboxConfig,
    transport: Arc<dyn HttpTransport>,
}

impl MxToolboxAdapter {
    /// Creates an adapter for the configured tool list.
    pub fn new(config: MxToolboxConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    fn tool_url(&self, tool: &str, domain: &str) -> String {
        format!("{}/lookup/{}/{}", self.config.base_url, tool, domain)
    }
}

#[async_trait]
impl ProviderAdapter for MxToolboxAdapter {
    fn provider(&self) -> Provider {
        Provider::MxToolbox
    }

    /// Reports adapter-level success even when individual tools fail; the
    /// per-tool outcomes live in the returned tool map.
    async fn fetch(&self, domain: &str, timeout: Duration) -> ProviderResult {
        let Some(key) = self.config.api_key.as_deref() else {
            return ProviderResult::missing_credential(Provider::MxToolbox, ENV_MXTOOLBOX_API_KEY);
        };

        let attempts: Arc<[AuthAttempt]> = mxtoolbox_auth_attempts(&self.config, key).into();
        let tools = self.config.tools.clone();
        let limit = MAX_CONCURRENT_TOOLS.min(tools.len());
        debug!(
            "MXToolbox lookup for {} ({} tools, {} concurrent)",
            domain,
            tools.len(),
            limit
        );

        let urls: Vec<(String, String)> = tools
            .into_iter()
            .map(|tool| {
                let url = self.tool_url(&tool, domain);
                (tool, url)
            })
            .collect();
        let endpoints: Vec<(String, String)> = urls.clone();

        let outcomes = run_bounded(urls, limit, |(_, url)| {
            let transport = Arc::clone(&self.transport);
            let attempts = Arc::clone(&attempts);
            async move {
                let response = run_auth_protocol(transport.as_ref(), &url, timeout, &attempts).await;
                FetchOutcome::from_response(response, url)
            }
        })
        .await;

        let mut merged = BTreeMap::new();
        for ((tool, url), outcome) in endpoints.into_iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|e| {
                let description = describe_join_error(&e);
                warn!("MXToolbox tool {} for {}: {}", tool, domain, description);
                FetchOutcome::from_response(TransportResponse::unreachable(description), url)
            });
            merged.insert(tool, outcome);
        }

        ProviderResult::tools(
            Provider::MxToolbox,
            MxToolboxData {
                tools: merged,
                endpoint_base: self.config.base_url.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregatorConfig;
    use crate::transport::fake::FakeTransport;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(key: Option<&str>, tools: &[&str]) -> MxToolboxConfig {
        MxToolboxConfig {
            api_key: key.map(str::to_string),
            base_url: "https://mx.test/api/v1".into(),
            tools: tools.iter().map(|t| t.to_string()).collect(),
            ..AggregatorConfig::default().mxtoolbox
        }
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let transport = Arc::new(FakeTransport::ok(json!({})));
        let adapter = MxToolboxAdapter::new(config(None, &["dns"]), transport.clone());

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("MXTOOLBOX_API_KEY not set"));
        assert!(result.tools_data().is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fallback_to_x_api_key_after_401() {
        let transport = Arc::new(FakeTransport::new(|request| {
            let uses_x_api_key = request.headers.iter().any(|(name, _)| name == "X-API-Key");
            if uses_x_api_key {
                TransportResponse::from_status(200, Some(json!({"Information": "ok"})))
            } else {
                TransportResponse::from_status(401, None)
            }
        }));
        let adapter = MxToolboxAdapter::new(config(Some("k"), &["spf"]), transport.clone());

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        let tools = result.tools_data().unwrap();
        let spf = &tools.tools["spf"];
        assert!(spf.success);
        assert_eq!(spf.status_code, 200);

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].headers,
            vec![("Authorization".to_string(), "Bearer k".to_string())]
        );
        assert_eq!(
            calls[1].headers,
            vec![("X-API-Key".to_string(), "k".to_string())]
        );
        assert!(calls
            .iter()
            .all(|c| c.url == "https://mx.test/api/v1/lookup/spf/example.com"));
    }

    #[tokio::test]
    async fn test_server_error_does_not_fall_back() {
        let transport = Arc::new(FakeTransport::new(|_| {
            TransportResponse::from_status(500, None)
        }));
        let adapter = MxToolboxAdapter::new(config(Some("k"), &["dns"]), transport.clone());

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        let dns = &result.tools_data().unwrap().tools["dns"];
        assert!(!dns.success);
        assert_eq!(dns.status_code, 500);
        assert_eq!(dns.error.as_deref(), Some("HTTP 500"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_outer_success_even_when_all_tools_fail() {
        let transport = Arc::new(FakeTransport::new(|_| {
            TransportResponse::unreachable("connection failed")
        }));
        let adapter =
            MxToolboxAdapter::new(config(Some("k"), &["dns", "spf", "dmarc"]), transport);

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        assert!(result.success);
        assert!(result.error.is_none());
        let data = result.tools_data().unwrap();
        assert_eq!(data.endpoint_base, "https://mx.test/api/v1");
        assert_eq!(data.tools.len(), 3);
        assert!(data.tools.values().all(|o| !o.success && o.status_code == 0));
    }

    #[tokio::test]
    async fn test_tool_concurrency_is_bounded() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (active_in, peak_in) = (Arc::clone(&active), Arc::clone(&peak));
        let transport = Arc::new(
            FakeTransport::new(move |_| {
                active_in.fetch_sub(1, Ordering::SeqCst);
                TransportResponse::from_status(200, None)
            })
            .with_delay(move |_| {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak_in.fetch_max(now, Ordering::SeqCst);
                Some(Duration::from_millis(30))
            }),
        );
        let tools = ["t1", "t2", "t3", "t4", "t5", "t6", "t7", "t8"];
        let adapter = MxToolboxAdapter::new(config(Some("k"), &tools), transport.clone());

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        assert_eq!(result.tools_data().unwrap().tools.len(), 8);
        assert_eq!(transport.call_count(), 8);
        let observed = peak.load(Ordering::SeqCst);
        assert!(observed <= 5, "observed {observed} concurrent tool requests");
    }

    #[tokio::test]
    async fn test_empty_tool_list_yields_empty_map() {
        let transport = Arc::new(FakeTransport::ok(json!({})));
        let adapter = MxToolboxAdapter::new(config(Some("k"), &[]), transport.clone());

        let result = adapter.fetch("example.com", Duration::from_secs(5)).await;

        assert!(result.success);
        assert!(result.tools_data().unwrap().tools.is_empty());
        assert_eq!(transport.call_count(), 0);
    }
}
