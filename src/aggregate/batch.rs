//! Batch aggregation across many domains.

use std::time::Duration;

use log::{info, warn};

use super::Aggregator;
use crate::config::MAX_CONCURRENT_DOMAINS;
use crate::models::{AggregationRecord, Provider, ProviderResult, ProviderResults};
use crate::security::SecurityProjection;
use crate::utils::{describe_join_error, run_bounded};

/// Trims every entry and drops the ones left empty, keeping order and duplicates.
pub fn normalize_domains<S: AsRef<str>>(domains: &[S]) -> Vec<String> {
    domains
        .iter()
        .map(|domain| domain.as_ref().trim())
        .filter(|domain| !domain.is_empty())
        .map(str::to_string)
        .collect()
}

/// Record for a domain whose aggregation task faulted.
fn faulted_record(domain: String, description: &str) -> AggregationRecord {
    AggregationRecord {
        domain,
        providers: ProviderResults {
            builtwith: ProviderResult::failure(Provider::BuiltWith, description),
            mxtoolbox: ProviderResult::failure(Provider::MxToolbox, description),
            virustotal: ProviderResult::failure(Provider::VirusTotal, description),
        },
        security: SecurityProjection::default(),
        summary: None,
    }
}

impl Aggregator {
    /// Aggregates many domains with bounded concurrency.
    ///
    /// Entries are trimmed and blanks are dropped; duplicates are processed
    /// independently. The result holds one record per remaining entry, in
    /// input order. At most [`MAX_CONCURRENT_DOMAINS`] domains are in flight,
    /// and a slow or failing domain never holds back the others beyond
    /// occupying its own slot.
    pub async fn aggregate_domains<S: AsRef<str>>(
        &self,
        domains: &[S],
        timeout: Duration,
    ) -> Vec<AggregationRecord> {
        let domains = normalize_domains(domains);
        if domains.is_empty() {
            return Vec::new();
        }

        let limit = domains.len().min(MAX_CONCURRENT_DOMAINS);
        info!("Aggregating {} domain(s), {} at a time", domains.len(), limit);

        let results = run_bounded(domains.clone(), limit, |domain| {
            let aggregator = self.clone();
            async move { aggregator.aggregate_domain(&domain, timeout).await }
        })
        .await;

        domains
            .into_iter()
            .zip(results)
            .map(|(domain, result)| match result {
                Ok(record) => record,
                Err(e) => {
                    let description = describe_join_error(&e);
                    warn!("Aggregation of {} faulted: {}", domain, description);
                    faulted_record(domain, &description)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{aggregator, full_config, respond, target_domain};
    use super::*;
    use crate::providers::ProviderAdapter;
    use crate::transport::fake::FakeTransport;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn test_normalize_domains() {
        let input = ["  example.com ", "", "   ", "example.org", "example.com"];
        assert_eq!(
            normalize_domains(&input),
            vec!["example.com", "example.org", "example.com"]
        );
        assert!(normalize_domains::<&str>(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_requests() {
        let transport = Arc::new(FakeTransport::new(respond));
        let records = aggregator(&full_config(), &transport)
            .aggregate_domains(&["", "  "], Duration::from_secs(5))
            .await;

        assert!(records.is_empty());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_of_one_matches_single_aggregation() {
        let transport = Arc::new(FakeTransport::new(respond));
        let aggregator = aggregator(&full_config(), &transport);

        let single = aggregator
            .aggregate_domain("example.com", Duration::from_secs(5))
            .await;
        let batch = aggregator
            .aggregate_domains(&[" example.com "], Duration::from_secs(5))
            .await;

        assert_eq!(batch, vec![single]);
    }

    #[tokio::test]
    async fn test_order_and_duplicates_are_preserved() {
        // Earlier domains answer slower so completion order is reversed.
        let transport = Arc::new(FakeTransport::new(respond).with_delay(|request| {
            let delay = match target_domain(request).as_str() {
                "a.test" => 60,
                "b.test" => 30,
                _ => 0,
            };
            Some(Duration::from_millis(delay))
        }));
        let input = ["a.test", "b.test", "", "c.test", "a.test"];

        let records = aggregator(&full_config(), &transport)
            .aggregate_domains(&input, Duration::from_secs(5))
            .await;

        let domains: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.test", "b.test", "c.test", "a.test"]);
    }

    #[tokio::test]
    async fn test_slow_domain_does_not_block_others() {
        let finished = Arc::new(Mutex::new(Vec::<(String, Duration)>::new()));
        let started = Instant::now();
        let finish_times = Arc::clone(&finished);

        let transport = Arc::new(
            FakeTransport::new(move |request| {
                finish_times
                    .lock()
                    .unwrap()
                    .push((target_domain(request), started.elapsed()));
                respond(request)
            })
            .with_delay(|request| {
                let slow = target_domain(request) == "slow.test";
                Some(Duration::from_millis(if slow { 800 } else { 10 }))
            }),
        );

        let mut input = vec!["slow.test".to_string()];
        input.extend((1..10).map(|n| format!("fast{n}.test")));

        let records = aggregator(&full_config(), &transport)
            .aggregate_domains(&input, Duration::from_secs(5))
            .await;
        assert_eq!(records.len(), 10);

        let finished = finished.lock().unwrap();
        let latest_fast = finished
            .iter()
            .filter(|(domain, _)| domain.starts_with("fast"))
            .map(|(_, at)| *at)
            .max()
            .unwrap();
        assert!(
            latest_fast < Duration::from_millis(600),
            "fast domains finished at {latest_fast:?}, behind the slow one"
        );
    }

    #[tokio::test]
    async fn test_domain_concurrency_is_bounded() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        // Only VirusTotal is enabled, so one request equals one domain in flight.
        let mut config = full_config();
        config.builtwith.api_key = None;
        config.mxtoolbox.api_key = None;

        let (a, p) = (Arc::clone(&active), Arc::clone(&peak));
        let transport = Arc::new(
            FakeTransport::new(move |request| {
                a.fetch_sub(1, Ordering::SeqCst);
                respond(request)
            })
            .with_delay(move |_| {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                p.fetch_max(now, Ordering::SeqCst);
                Some(Duration::from_millis(30))
            }),
        );

        let input: Vec<String> = (0..20).map(|n| format!("d{n}.test")).collect();
        let records = aggregator(&config, &transport)
            .aggregate_domains(&input, Duration::from_secs(5))
            .await;

        assert_eq!(records.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= MAX_CONCURRENT_DOMAINS);
        assert_eq!(transport.call_count(), 20);
    }

    /// Delegates to `inner`, but panics on the first `provider()` call.
    /// That call happens before the adapter task is spawned, so the panic
    /// unwinds the whole domain task.
    struct FaultOnceAdapter {
        inner: Arc<dyn ProviderAdapter>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProviderAdapter for FaultOnceAdapter {
        fn provider(&self) -> Provider {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("provider lookup failed");
            }
            self.inner.provider()
        }

        async fn fetch(&self, domain: &str, timeout: Duration) -> ProviderResult {
            self.inner.fetch(domain, timeout).await
        }
    }

    #[tokio::test]
    async fn test_faulted_domain_keeps_its_slot() {
        let transport = Arc::new(FakeTransport::new(respond));
        let standard = aggregator(&full_config(), &transport);
        let faulty = Aggregator::with_adapters(
            Arc::clone(&standard.builtwith),
            Arc::new(FaultOnceAdapter {
                inner: Arc::clone(&standard.mxtoolbox),
                calls: AtomicUsize::new(0),
            }),
            Arc::clone(&standard.virustotal),
        );
        let input = ["a.test", "b.test", "c.test"];

        let records = faulty
            .aggregate_domains(&input, Duration::from_secs(5))
            .await;

        assert_eq!(records.len(), input.len());
        for (record, domain) in records.iter().zip(input) {
            assert_eq!(record.domain, domain);
        }

        let (faulted, healthy): (Vec<_>, Vec<_>) = records
            .iter()
            .partition(|record| record.providers.iter().all(|r| !r.success));
        assert_eq!(faulted.len(), 1);
        assert_eq!(healthy.len(), 2);

        let faulted = faulted[0];
        for result in faulted.providers.iter() {
            assert!(result.error.as_deref().unwrap().starts_with("task panicked"));
            assert_eq!(result.status_code, None);
        }
        assert_eq!(faulted.security, SecurityProjection::default());

        for record in healthy {
            assert!(record.providers.iter().all(|r| r.success));
            assert!(!record.security.vendors.is_empty());
            assert_eq!(record.security.virustotal.reputation, Some(7));
        }
    }

    #[test]
    fn test_faulted_record_shape() {
        let record = faulted_record("example.com".into(), "task panicked");
        assert_eq!(record.domain, "example.com");
        assert!(record
            .providers
            .iter()
            .all(|r| !r.success && r.error.as_deref() == Some("task panicked")));
        assert_eq!(record.security, SecurityProjection::default());
    }
}
