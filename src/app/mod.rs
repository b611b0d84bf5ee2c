//! Command-line application layer.
//!
//! This module provides domain list input, JSON output, statistics printing
//! and the `aggregate` command that ties them to the library.

pub mod input;
pub mod output;
pub mod statistics;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::info;

use crate::aggregate::Aggregator;
use crate::config::{AggregateArgs, AggregatorConfig};
use crate::error_handling::AggregationStats;
use crate::summary::summarize;

// Re-export public API
pub use input::{collect_domains, parse_domain_lines, read_domain_source};
pub use output::{render_results, write_output};
pub use statistics::print_aggregation_statistics;

/// Outcome of an `aggregate` run, for the final one-line report.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Domains aggregated
    pub domains: usize,
    /// Provider results that succeeded
    pub provider_successes: usize,
    /// Provider results and MXToolbox lookups that failed
    pub failures: usize,
    /// Wall-clock duration of the run
    pub elapsed_seconds: f64,
    /// Output file, if results were not written to stdout
    pub output: Option<PathBuf>,
}

/// Runs the `aggregate` command against the given configuration.
///
/// # Errors
///
/// Fails on an empty domain list, an unreadable domain file, a zero timeout,
/// a client that cannot be built, or output that cannot be written. Provider
/// failures never fail the run; they are reported inside the records.
pub async fn run_aggregate(args: &AggregateArgs, config: &AggregatorConfig) -> Result<AggregateReport> {
    let started = Instant::now();

    if args.timeout == 0 {
        bail!("--timeout must be at least 1 second");
    }

    let domains = collect_domains(&args.domains, args.file.as_deref()).await?;
    if domains.is_empty() {
        bail!("No domains provided: pass domains as arguments or use --file");
    }

    let aggregator = Aggregator::from_config(config).context("Failed to initialize HTTP client")?;
    let mut records = aggregator
        .aggregate_domains(&domains, Duration::from_secs(args.timeout))
        .await;

    if !args.no_summary {
        for record in &mut records {
            record.summary = Some(summarize(record));
        }
    }

    let stats = AggregationStats::new();
    for record in &records {
        stats.record(record);
    }

    let rendered = render_results(&records, !args.compact).context("Failed to serialize results")?;
    write_output(args.output.as_deref(), &rendered).await?;

    print_aggregation_statistics(&stats);

    let elapsed_seconds = started.elapsed().as_secs_f64();
    info!("Run finished in {:.1}s", elapsed_seconds);

    Ok(AggregateReport {
        domains: stats.domain_count(),
        provider_successes: stats.provider_successes(),
        failures: stats.total_failures(),
        elapsed_seconds,
        output: args.output.clone(),
    })
}
