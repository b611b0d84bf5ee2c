//! Reputation data from VirusTotal domain reports.

use serde_json::Value;

use super::types::VirusTotalSecurity;
use crate::utils::json::{lookup, lookup_object};

/// Extracts `data.attributes.{last_analysis_stats, reputation, categories}`.
///
/// Each field is copied only when it has the expected type (object, integer,
/// object); anything else is left out.
pub fn extract_virustotal_security(data: Option<&Value>) -> VirusTotalSecurity {
    let Some(attributes) = data
        .and_then(|d| lookup(d, &["data"]))
        .and_then(|d| lookup(d, &["attributes"]))
    else {
        return VirusTotalSecurity::default();
    };

    VirusTotalSecurity {
        last_analysis_stats: lookup_object(attributes, &["last_analysis_stats"]).cloned(),
        reputation: lookup(attributes, &["reputation"]).and_then(Value::as_i64),
        categories: lookup_object(attributes, &["categories"]).cloned(),
    }
}

/// `data.attributes.last_analysis_stats`, verbatim.
pub fn last_analysis_stats(data: Option<&Value>) -> Option<Value> {
    extract_virustotal_security(data)
        .last_analysis_stats
        .map(Value::Object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_pass_through_unchanged() {
        let data = json!({
            "data": {
                "attributes": {
                    "last_analysis_stats": {"harmless": 10, "malicious": 2},
                    "reputation": -5,
                    "categories": {"Forcepoint ThreatSeeker": "information technology"}
                }
            }
        });
        let security = extract_virustotal_security(Some(&data));
        assert_eq!(
            Value::Object(security.last_analysis_stats.unwrap()),
            json!({"harmless": 10, "malicious": 2})
        );
        assert_eq!(security.reputation, Some(-5));
        assert_eq!(
            Value::Object(security.categories.unwrap()),
            json!({"Forcepoint ThreatSeeker": "information technology"})
        );
    }

    #[test]
    fn test_missing_attributes_omits_everything() {
        let data = json!({"data": {"id": "example.com"}});
        let security = extract_virustotal_security(Some(&data));
        assert_eq!(security, VirusTotalSecurity::default());

        let serialized = serde_json::to_value(&security).unwrap();
        assert!(serialized.get("last_analysis_stats").is_none());
    }

    #[test]
    fn test_wrong_types_are_dropped_individually() {
        let data = json!({
            "data": {
                "attributes": {
                    "last_analysis_stats": [10, 2],
                    "reputation": 3.5,
                    "categories": {"vendor": "news"}
                }
            }
        });
        let security = extract_virustotal_security(Some(&data));
        assert!(security.last_analysis_stats.is_none());
        assert!(security.reputation.is_none());
        assert!(security.categories.is_some());

        let data = json!({"data": {"attributes": {"reputation": true}}});
        assert!(extract_virustotal_security(Some(&data)).reputation.is_none());
    }

    #[test]
    fn test_non_object_payloads() {
        for data in [json!(null), json!("x"), json!({"data": []}), json!({"data": {"attributes": 1}})] {
            assert_eq!(
                extract_virustotal_security(Some(&data)),
                VirusTotalSecurity::default()
            );
        }
        assert_eq!(extract_virustotal_security(None), VirusTotalSecurity::default());
    }
}
