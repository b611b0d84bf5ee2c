//! Single-domain aggregation.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::Aggregator;
use crate::models::{AggregationRecord, ProviderResult, ProviderResults};
use crate::providers::ProviderAdapter;
use crate::security::project;
use crate::utils::describe_join_error;

/// Runs one adapter on its own task so a panic inside it becomes a failed result.
async fn run_adapter(
    adapter: Arc<dyn ProviderAdapter>,
    domain: Arc<str>,
    timeout: Duration,
) -> ProviderResult {
    let provider = adapter.provider();
    let task = tokio::spawn(async move { adapter.fetch(&domain, timeout).await });
    match task.await {
        Ok(result) => result,
        Err(e) => {
            let description = describe_join_error(&e);
            warn!("{} adapter faulted: {}", provider, description);
            ProviderResult::failure(provider, description)
        }
    }
}

impl Aggregator {
    /// Aggregates all three providers for one domain.
    ///
    /// The adapters run concurrently, one task each, and every one of them
    /// is awaited regardless of how the others fare. The security projection
    /// is computed once all three results are in.
    pub async fn aggregate_domain(&self, domain: &str, timeout: Duration) -> AggregationRecord {
        debug!("Aggregating {}", domain);
        let shared: Arc<str> = Arc::from(domain);

        let (builtwith, mxtoolbox, virustotal) = tokio::join!(
            run_adapter(Arc::clone(&self.builtwith), Arc::clone(&shared), timeout),
            run_adapter(Arc::clone(&self.mxtoolbox), Arc::clone(&shared), timeout),
            run_adapter(Arc::clone(&self.virustotal), Arc::clone(&shared), timeout),
        );

        let providers = ProviderResults {
            builtwith,
            mxtoolbox,
            virustotal,
        };
        for result in providers.iter().filter(|r| !r.success) {
            debug!(
                "{} failed for {}: {}",
                result.provider,
                domain,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }

        let security = project(&providers);
        info!(
            "Aggregated {}: {}/3 providers succeeded, {} security vendors",
            domain,
            providers.iter().filter(|r| r.success).count(),
            security.vendors.len()
        );

        AggregationRecord {
            domain: domain.to_string(),
            providers,
            security,
            summary: None,
        }
    }
}
