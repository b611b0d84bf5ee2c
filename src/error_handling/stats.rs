//! Aggregation statistics tracking.
//!
//! Counters are fed from finished records after fan-in, so aggregation tasks
//! never touch them. Atomic counters keep the tracker shareable via `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::categorization::{categorize_outcome, categorize_provider_result};
use super::types::FailureKind;
use crate::models::AggregationRecord;

/// Thread-safe tracker of provider and sub-tool outcomes.
///
/// All failure kinds are initialized to zero on creation.
pub struct AggregationStats {
    domains: AtomicUsize,
    provider_successes: AtomicUsize,
    tool_successes: AtomicUsize,
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl AggregationStats {
    /// Creates empty counters with every failure kind at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        AggregationStats {
            domains: AtomicUsize::new(0),
            provider_successes: AtomicUsize::new(0),
            tool_successes: AtomicUsize::new(0),
            failures,
        }
    }

    /// Increment a failure counter.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in AggregationStats initialization.",
                kind
            );
        }
    }

    /// Records every provider result (and every MXToolbox tool) of a record.
    pub fn record(&self, record: &AggregationRecord) {
        self.domains.fetch_add(1, Ordering::Relaxed);
        for result in record.providers.iter() {
            match categorize_provider_result(result) {
                Some(kind) => self.increment_failure(kind),
                None => {
                    self.provider_successes.fetch_add(1, Ordering::Relaxed);
                }
            }
            if let Some(tools) = result.tools_data() {
                for outcome in tools.tools.values() {
                    match categorize_outcome(outcome) {
                        Some(kind) => self.increment_failure(kind),
                        None => {
                            self.tool_successes.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            }
        }
    }

    /// Domains recorded so far.
    pub fn domain_count(&self) -> usize {
        self.domains.load(Ordering::Relaxed)
    }

    /// Successful provider results.
    pub fn provider_successes(&self) -> usize {
        self.provider_successes.load(Ordering::Relaxed)
    }

    /// Successful MXToolbox tool lookups.
    pub fn tool_successes(&self) -> usize {
        self.tool_successes.load(Ordering::Relaxed)
    }

    /// Failures recorded for `kind`.
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Failures across all kinds.
    pub fn total_failures(&self) -> usize {
        FailureKind::iter()
            .map(|kind| self.get_failure_count(kind))
            .sum()
    }
}

impl Default for AggregationStats {
    fn default() -> Self {
        Self::new()
    }
}
