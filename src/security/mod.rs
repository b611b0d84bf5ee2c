//! Security projection of provider payloads.
//!
//! Each provider has its own extractor that reads a raw, loosely-typed payload
//! and returns an empty/default value for anything it does not recognize. A
//! failed provider simply contributes its default projection.

mod builtwith;
mod mxtoolbox;
mod types;
mod virustotal;

pub use builtwith::{
    count_technologies, extract_builtwith_security, is_security_relevant,
    KNOWN_SECURITY_VENDORS, SECURITY_KEYWORDS,
};
pub use mxtoolbox::{extract_mxtoolbox_security, BLACKLIST_SUMMARY_KEYS};
pub use types::{MxToolboxSecurity, SecurityProjection, SecurityVendor, VirusTotalSecurity};
pub use virustotal::{extract_virustotal_security, last_analysis_stats};

use crate::models::ProviderResults;

/// Runs all three extractors over a domain's provider results.
pub fn project(providers: &ProviderResults) -> SecurityProjection {
    SecurityProjection {
        vendors: extract_builtwith_security(providers.builtwith.raw_data()),
        mxtoolbox: extract_mxtoolbox_security(providers.mxtoolbox.tools_data()),
        virustotal: extract_virustotal_security(providers.virustotal.raw_data()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FetchOutcome, Provider, ProviderResult};
    use serde_json::json;

    fn ok(provider: Provider, data: serde_json::Value) -> ProviderResult {
        ProviderResult::from_outcome(
            provider,
            FetchOutcome {
                success: true,
                status_code: 200,
                error: None,
                data: Some(data),
                endpoint: "https://example.test".into(),
            },
        )
    }

    #[test]
    fn test_project_only_reflects_available_providers() {
        let providers = ProviderResults {
            builtwith: ok(
                Provider::BuiltWith,
                json!({"Results": [{"Result": {"Paths": [{"Technologies": [{"Name": "Imperva"}]}]}}]}),
            ),
            mxtoolbox: ProviderResult::missing_credential(Provider::MxToolbox, "MXTOOLBOX_API_KEY"),
            virustotal: ProviderResult::failure(Provider::VirusTotal, "connection failed"),
        };

        let projection = project(&providers);
        assert_eq!(projection.vendors.len(), 1);
        assert_eq!(projection.mxtoolbox, MxToolboxSecurity::default());
        assert_eq!(projection.virustotal, VirusTotalSecurity::default());
    }

    #[test]
    fn test_raw_payload_in_mxtoolbox_slot_is_ignored() {
        let providers = ProviderResults {
            builtwith: ProviderResult::failure(Provider::BuiltWith, "x"),
            mxtoolbox: ok(Provider::MxToolbox, json!({"tools": "garbage"})),
            virustotal: ProviderResult::failure(Provider::VirusTotal, "x"),
        };
        assert_eq!(project(&providers), SecurityProjection::default());
    }
}
