//! Configuration constants.
//!
//! This module defines the defaults used throughout the aggregator, including
//! timeouts, concurrency bounds, provider endpoints and configuration key names.

/// Default per-request timeout in seconds.
///
/// Applied uniformly to every HTTP call at every tier. There is no aggregate
/// deadline across a fan-out.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default bind address for `serve`
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default port for `serve`
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// Concurrency bounds
/// Maximum number of domains aggregated at the same time.
pub const MAX_CONCURRENT_DOMAINS: usize = 8;
/// Maximum number of MXToolbox sub-tool lookups in flight for one domain.
pub const MAX_CONCURRENT_TOOLS: usize = 5;

/// User-Agent sent with every provider request.
pub const DEFAULT_USER_AGENT: &str = concat!("security_aggregator/", env!("CARGO_PKG_VERSION"));

// Provider endpoints
/// BuiltWith domain API endpoint (queried with `KEY` and `LOOKUP` parameters).
pub const DEFAULT_BUILTWITH_API_BASE: &str = "https://api.builtwith.com/v21/api.json";
/// MXToolbox REST API base; lookups live under `/lookup/{tool}/{domain}`.
pub const DEFAULT_MXTOOLBOX_BASE_URL: &str = "https://api.mxtoolbox.com/api/v1";
/// VirusTotal v3 API base; domain reports live under `/domains/{domain}`.
pub const DEFAULT_VT_BASE_URL: &str = "https://www.virustotal.com/api/v3";

/// MXToolbox lookups performed when `MXTOOLBOX_TOOLS` is not set.
pub const DEFAULT_MXTOOLBOX_TOOLS: &str = "dns,spf,dmarc,mx,blacklist";
/// Header carrying the first-stage MXToolbox credential.
pub const DEFAULT_MXTOOLBOX_AUTH_HEADER: &str = "Authorization";
/// Scheme prefixed to the key in the first-stage MXToolbox credential.
pub const DEFAULT_MXTOOLBOX_AUTH_SCHEME: &str = "Bearer";

// Configuration keys (environment variables or `.env` entries)
/// BuiltWith API key. Required for the BuiltWith adapter.
pub const ENV_BUILTWITH_API_KEY: &str = "BUILTWITH_API_KEY";
/// BuiltWith endpoint override.
pub const ENV_BUILTWITH_API_BASE: &str = "BUILTWITH_API_BASE";
/// MXToolbox API key. Required for the MXToolbox adapter.
pub const ENV_MXTOOLBOX_API_KEY: &str = "MXTOOLBOX_API_KEY";
/// MXToolbox base URL override.
pub const ENV_MXTOOLBOX_BASE_URL: &str = "MXTOOLBOX_BASE_URL";
/// Comma-separated MXToolbox tool list override.
pub const ENV_MXTOOLBOX_TOOLS: &str = "MXTOOLBOX_TOOLS";
/// First-stage MXToolbox auth header name override.
pub const ENV_MXTOOLBOX_AUTH_HEADER: &str = "MXTOOLBOX_AUTH_HEADER";
/// First-stage MXToolbox auth scheme override.
pub const ENV_MXTOOLBOX_AUTH_SCHEME: &str = "MXTOOLBOX_AUTH_SCHEME";
/// VirusTotal API key. Required for the VirusTotal adapter.
pub const ENV_VIRUSTOTAL_API_KEY: &str = "VIRUSTOTAL_API_KEY";
/// VirusTotal base URL override.
pub const ENV_VT_BASE_URL: &str = "VT_BASE_URL";

/// Template printed by `security_aggregator env-example`.
pub const ENV_EXAMPLE: &str = "\
# Copy this to .env and fill in your keys
BUILTWITH_API_KEY=your_builtwith_key
# Optional: override API base for BuiltWith (e.g., free1)
# BUILTWITH_API_BASE=https://api.builtwith.com/free1/api.json

MXTOOLBOX_API_KEY=your_mxtoolbox_key
# Optional overrides for MXToolbox
# MXTOOLBOX_BASE_URL=https://api.mxtoolbox.com/api/v1
# MXTOOLBOX_TOOLS=dns,spf,dmarc,mx,blacklist
# MXTOOLBOX_AUTH_HEADER=Authorization
# MXTOOLBOX_AUTH_SCHEME=Bearer

VIRUSTOTAL_API_KEY=your_virustotal_key
# Optional: VT_BASE_URL=https://www.virustotal.com/api/v3
";
