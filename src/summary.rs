//! Headline figures for an aggregation record.

use crate::models::{AggregationRecord, Summary};
use crate::security::{count_technologies, last_analysis_stats};

/// Computes the technology count and VirusTotal verdict stats for a record.
///
/// The technology count is left out when BuiltWith reported none.
pub fn summarize(record: &AggregationRecord) -> Summary {
    let technology_count = count_technologies(record.providers.builtwith.raw_data());
    Summary {
        builtwith_technology_count: (technology_count > 0).then_some(technology_count),
        virustotal_last_analysis_stats: last_analysis_stats(record.providers.virustotal.raw_data()),
    }
}
