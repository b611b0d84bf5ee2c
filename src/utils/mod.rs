//! Utility functions shared by the aggregation tiers.
//!
//! This module provides:
//! - Bounded fan-out/fan-in task groups with per-task fault isolation
//! - Schema-tolerant JSON key lookup

pub mod json;
mod task_group;

pub use task_group::{describe_join_error, run_bounded};
