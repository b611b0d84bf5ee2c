//! security_aggregator library: multi-provider domain security intelligence
//!
//! This library queries BuiltWith (technology profile), MXToolbox (DNS, mail
//! and blacklist lookups) and VirusTotal (reputation) for each domain, runs
//! the providers concurrently, and projects the raw responses into a compact
//! security view. Provider failures are reported inside each record and never
//! abort a domain or a batch. The same aggregation is available over HTTP
//! through [`server::router`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use security_aggregator::{summarize, Aggregator, AggregatorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AggregatorConfig::from_env()?;
//! let aggregator = Aggregator::from_config(&config)?;
//!
//! let mut record = aggregator
//!     .aggregate_domain("example.com", Duration::from_secs(30))
//!     .await;
//! record.summary = Some(summarize(&record));
//!
//! println!("{}", serde_json::to_string_pretty(&record)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod aggregate;
pub mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod providers;
pub mod security;
pub mod server;
mod summary;
pub mod transport;
mod utils;

// Re-export public API
pub use aggregate::{normalize_domains, Aggregator};
pub use config::{AggregatorConfig, LogFormat, LogLevel};
pub use error_handling::{AggregationStats, ConfigError, InitializationError};
pub use models::{AggregationRecord, Provider, ProviderResult, ProviderResults, Summary};
pub use security::SecurityProjection;
pub use summary::summarize;
