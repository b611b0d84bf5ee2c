//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{AggregationStats, FailureKind};

/// Prints domain, success and failure counts to the log.
pub fn print_aggregation_statistics(stats: &AggregationStats) {
    info!(
        "Aggregated {} domain(s): {} provider result(s) succeeded, {} MXToolbox lookup(s) succeeded",
        stats.domain_count(),
        stats.provider_successes(),
        stats.tool_successes()
    );

    let total_failures = stats.total_failures();
    if total_failures > 0 {
        info!("Failure Counts ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
