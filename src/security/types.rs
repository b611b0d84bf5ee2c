//! Security projection types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A technology classified as security-relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityVendor {
    /// Technology name as reported (trimmed)
    pub name: String,
    /// Category labels as reported (trimmed, blanks dropped)
    pub categories: Vec<String>,
}

/// Mail and blacklist posture from MXToolbox.
///
/// Absent fields mean the corresponding tool result was unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MxToolboxSecurity {
    /// `Information` field of the `dmarc` lookup, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmarc_record: Option<Value>,
    /// `Information` field of the `spf` lookup, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spf_record: Option<Value>,
    /// `(key, value)` pairs read from the `blacklist` lookup, in fixed key order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist_summary: Option<Vec<(String, Value)>>,
}

/// Reputation data from VirusTotal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirusTotalSecurity {
    /// Engine verdict counts, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_analysis_stats: Option<Map<String, Value>>,
    /// Community reputation score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,
    /// Categorization by vendor, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Map<String, Value>>,
}

/// Provider-agnostic security summary for one domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityProjection {
    /// Security-relevant BuiltWith technologies, in reported order
    pub vendors: Vec<SecurityVendor>,
    /// MXToolbox mail/blacklist posture
    pub mxtoolbox: MxToolboxSecurity,
    /// VirusTotal reputation
    pub virustotal: VirusTotalSecurity,
}
