//! Provider credential and endpoint resolution.
//!
//! All configuration keys are read exactly once, through a lookup function,
//! into an [`AggregatorConfig`] that is then shared read-only by every
//! adapter. Empty values are treated the same as absent ones.

use reqwest::header::HeaderName;
use url::Url;

use super::constants::*;
use crate::error_handling::ConfigError;

/// BuiltWith adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltWithConfig {
    /// `BUILTWITH_API_KEY`; the adapter is disabled when `None`.
    pub api_key: Option<String>,
    /// Full endpoint URL (query parameters are appended per request).
    pub api_base: String,
}

/// MXToolbox adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxToolboxConfig {
    /// `MXTOOLBOX_API_KEY`; the adapter is disabled when `None`.
    pub api_key: Option<String>,
    /// API base without a trailing slash.
    pub base_url: String,
    /// Sub-tools queried for every domain, in configured order.
    pub tools: Vec<String>,
    /// Header name used by the first auth stage.
    pub auth_header: String,
    /// Scheme prefixed to the key by the first auth stage.
    pub auth_scheme: String,
}

/// VirusTotal adapter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirusTotalConfig {
    /// `VIRUSTOTAL_API_KEY`; the adapter is disabled when `None`.
    pub api_key: Option<String>,
    /// API base without a trailing slash.
    pub base_url: String,
}

/// Process-wide aggregator configuration.
///
/// Built once before aggregation starts and passed explicitly to each
/// adapter; nothing in the aggregation path reads the environment directly.
///
/// # Examples
///
/// ```
/// use security_aggregator::AggregatorConfig;
///
/// let config = AggregatorConfig::from_lookup(|key| match key {
///     "VIRUSTOTAL_API_KEY" => Some("vt-key".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert!(config.builtwith.api_key.is_none());
/// assert_eq!(config.virustotal.api_key.as_deref(), Some("vt-key"));
/// assert_eq!(config.mxtoolbox.tools, ["dns", "spf", "dmarc", "mx", "blacklist"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// BuiltWith settings
    pub builtwith: BuiltWithConfig,
    /// MXToolbox settings
    pub mxtoolbox: MxToolboxConfig,
    /// VirusTotal settings
    pub virustotal: VirusTotalConfig,
}

impl AggregatorConfig {
    /// Resolves the configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an endpoint override is not a valid URL or
    /// the MXToolbox auth header override is not a valid header name.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AggregatorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let builtwith = BuiltWithConfig {
            api_key: get(ENV_BUILTWITH_API_KEY),
            api_base: validate_base(
                ENV_BUILTWITH_API_BASE,
                get(ENV_BUILTWITH_API_BASE)
                    .unwrap_or_else(|| DEFAULT_BUILTWITH_API_BASE.to_string()),
            )?,
        };

        let auth_header = get(ENV_MXTOOLBOX_AUTH_HEADER)
            .unwrap_or_else(|| DEFAULT_MXTOOLBOX_AUTH_HEADER.to_string());
        if HeaderName::from_bytes(auth_header.as_bytes()).is_err() {
            return Err(ConfigError::InvalidHeaderName {
                key: ENV_MXTOOLBOX_AUTH_HEADER,
                value: auth_header,
            });
        }

        let mxtoolbox = MxToolboxConfig {
            api_key: get(ENV_MXTOOLBOX_API_KEY),
            base_url: validate_base(
                ENV_MXTOOLBOX_BASE_URL,
                get(ENV_MXTOOLBOX_BASE_URL)
                    .unwrap_or_else(|| DEFAULT_MXTOOLBOX_BASE_URL.to_string()),
            )?,
            tools: parse_tool_list(
                &get(ENV_MXTOOLBOX_TOOLS).unwrap_or_else(|| DEFAULT_MXTOOLBOX_TOOLS.to_string()),
            ),
            auth_header,
            auth_scheme: get(ENV_MXTOOLBOX_AUTH_SCHEME)
                .unwrap_or_else(|| DEFAULT_MXTOOLBOX_AUTH_SCHEME.to_string()),
        };

        let virustotal = VirusTotalConfig {
            api_key: get(ENV_VIRUSTOTAL_API_KEY),
            base_url: validate_base(
                ENV_VT_BASE_URL,
                get(ENV_VT_BASE_URL).unwrap_or_else(|| DEFAULT_VT_BASE_URL.to_string()),
            )?,
        };

        Ok(Self {
            builtwith,
            mxtoolbox,
            virustotal,
        })
    }
}

impl Default for AggregatorConfig {
    /// Default endpoints with every adapter disabled (no credentials).
    fn default() -> Self {
        Self {
            builtwith: BuiltWithConfig {
                api_key: None,
                api_base: DEFAULT_BUILTWITH_API_BASE.to_string(),
            },
            mxtoolbox: MxToolboxConfig {
                api_key: None,
                base_url: DEFAULT_MXTOOLBOX_BASE_URL.to_string(),
                tools: parse_tool_list(DEFAULT_MXTOOLBOX_TOOLS),
                auth_header: DEFAULT_MXTOOLBOX_AUTH_HEADER.to_string(),
                auth_scheme: DEFAULT_MXTOOLBOX_AUTH_SCHEME.to_string(),
            },
            virustotal: VirusTotalConfig {
                api_key: None,
                base_url: DEFAULT_VT_BASE_URL.to_string(),
            },
        }
    }
}

/// Splits a comma-separated tool list, trimming entries and dropping blanks.
pub fn parse_tool_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_base(key: &'static str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        Ok(url) => Err(ConfigError::InvalidBaseUrl {
            key,
            value,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => Err(ConfigError::InvalidBaseUrl {
            key,
            value,
            reason: e.to_string(),
        }),
    }
}
