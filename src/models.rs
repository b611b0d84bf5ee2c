//! Aggregation result types.
//!
//! Every value here is built fresh for one aggregation call, owned by the
//! caller afterwards, and serializes to plain JSON (strings, numbers, booleans,
//! nulls, arrays and string-keyed objects).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::security::SecurityProjection;
use crate::transport::TransportResponse;

/// One of the three domain-intelligence providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// BuiltWith technology fingerprinting
    BuiltWith,
    /// MXToolbox DNS and mail security lookups
    MxToolbox,
    /// VirusTotal domain reputation
    VirusTotal,
}

impl Provider {
    /// Key used for this provider in aggregation output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::BuiltWith => "builtwith",
            Provider::MxToolbox => "mxtoolbox",
            Provider::VirusTotal => "virustotal",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single HTTP call against a provider endpoint.
///
/// `success` is true exactly when `error` is `None`. A `status_code` of 0 means
/// the request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Whether the call completed with a 2xx status
    pub success: bool,
    /// HTTP status, or 0 for transport-level failures
    pub status_code: u16,
    /// `"HTTP <code>"` or a transport failure description
    pub error: Option<String>,
    /// Response body, when it decoded as JSON
    pub data: Option<Value>,
    /// URL that was requested (without credentials)
    pub endpoint: String,
}

impl FetchOutcome {
    /// Wraps a transport response together with the endpoint it came from.
    pub fn from_response(response: TransportResponse, endpoint: impl Into<String>) -> Self {
        Self {
            success: response.error.is_none(),
            status_code: response.status_code,
            error: response.error,
            data: response.data,
            endpoint: endpoint.into(),
        }
    }
}

/// Merged MXToolbox sub-tool results for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MxToolboxData {
    /// Outcome per tool name
    pub tools: BTreeMap<String, FetchOutcome>,
    /// Base URL the tool endpoints were built from
    pub endpoint_base: String,
}

/// Provider payload: raw JSON for single-call providers, a tool map for MXToolbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderData {
    /// MXToolbox merged sub-tool results
    Tools(MxToolboxData),
    /// Decoded response body
    Raw(Value),
}

/// Result of running one provider adapter for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    /// Which provider produced this result
    pub provider: Provider,
    /// Adapter-level success
    pub success: bool,
    /// HTTP status of the provider call, absent when no single call applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Failure description
    pub error: Option<String>,
    /// Provider payload
    pub data: Option<ProviderData>,
    /// Requested endpoint, absent when no request was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Set when the adapter was skipped because its credential is not configured
    #[serde(skip)]
    pub credential_missing: bool,
}

impl ProviderResult {
    /// Result for a single-call provider.
    pub fn from_outcome(provider: Provider, outcome: FetchOutcome) -> Self {
        Self {
            provider,
            success: outcome.success,
            status_code: Some(outcome.status_code),
            error: outcome.error,
            data: outcome.data.map(ProviderData::Raw),
            endpoint: Some(outcome.endpoint),
            credential_missing: false,
        }
    }

    /// Result for an adapter whose credential is not configured.
    pub fn missing_credential(provider: Provider, key: &str) -> Self {
        Self {
            credential_missing: true,
            ..Self::failure(provider, format!("{key} not set"))
        }
    }

    /// Result for an adapter that faulted before producing an outcome.
    pub fn failure(provider: Provider, error: impl Into<String>) -> Self {
        Self {
            provider,
            success: false,
            status_code: None,
            error: Some(error.into()),
            data: None,
            endpoint: None,
            credential_missing: false,
        }
    }

    /// Result for the MXToolbox adapter, successful at the adapter level even
    /// when individual tools failed.
    pub fn tools(provider: Provider, data: MxToolboxData) -> Self {
        Self {
            provider,
            success: true,
            status_code: None,
            error: None,
            data: Some(ProviderData::Tools(data)),
            endpoint: None,
            credential_missing: false,
        }
    }

    /// Raw JSON payload, if this result carries one.
    pub fn raw_data(&self) -> Option<&Value> {
        match &self.data {
            Some(ProviderData::Raw(value)) => Some(value),
            _ => None,
        }
    }

    /// MXToolbox tool map, if this result carries one.
    pub fn tools_data(&self) -> Option<&MxToolboxData> {
        match &self.data {
            Some(ProviderData::Tools(data)) => Some(data),
            _ => None,
        }
    }
}

/// Per-provider results for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResults {
    /// BuiltWith result
    pub builtwith: ProviderResult,
    /// MXToolbox result
    pub mxtoolbox: ProviderResult,
    /// VirusTotal result
    pub virustotal: ProviderResult,
}

impl ProviderResults {
    /// Iterates the three results in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderResult> {
        [&self.builtwith, &self.mxtoolbox, &self.virustotal].into_iter()
    }
}

/// Everything gathered for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationRecord {
    /// Domain as requested (trimmed)
    pub domain: String,
    /// Raw provider results
    pub providers: ProviderResults,
    /// Security-relevant projection of the provider payloads
    pub security: SecurityProjection,
    /// Optional headline figures, see [`crate::summarize`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// Headline figures derived from a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of technologies BuiltWith reported across all paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtwith_technology_count: Option<usize>,
    /// VirusTotal `last_analysis_stats`, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virustotal_last_analysis_stats: Option<Value>,
}
