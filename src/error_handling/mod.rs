//! Error handling and aggregation statistics.
//!
//! This module provides:
//! - Error type definitions for startup and configuration
//! - Failure categorization of provider and sub-tool outcomes
//! - Aggregation statistics tracking
//!
//! Provider failures are never Rust errors: they are recorded in the
//! corresponding result and only categorized here for reporting.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_outcome, categorize_provider_result, categorize_status};
pub use stats::AggregationStats;
pub use types::{ConfigError, FailureKind, InitializationError};
