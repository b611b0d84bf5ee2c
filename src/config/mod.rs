//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, concurrency bounds, default endpoints)
//! - HTTP header and query parameter name constants
//! - Provider credential/endpoint resolution
//! - CLI definition and option types

mod cli;
mod constants;
mod headers;
mod providers;
mod types;

// Re-export public API
pub use cli::{AggregateArgs, Cli, Command, ServeArgs};
pub use constants::*;
pub use headers::*;
pub use providers::{
    parse_tool_list, AggregatorConfig, BuiltWithConfig, MxToolboxConfig, VirusTotalConfig,
};
pub use types::{LogFormat, LogLevel};
