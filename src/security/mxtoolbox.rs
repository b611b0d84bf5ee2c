//! Mail and blacklist posture from MXToolbox tool results.

use serde_json::Value;

use super::types::MxToolboxSecurity;
use crate::models::MxToolboxData;
use crate::utils::json::lookup;

/// Blacklist fields worth surfacing, in output order. The blacklist API
/// response shape varies, so whichever of these exist are collected.
pub const BLACKLIST_SUMMARY_KEYS: &[&str] = &["ErrorCode", "Failed", "FailureCount", "Blacklists"];

fn tool_object<'a>(data: &'a MxToolboxData, tool: &str) -> Option<&'a Value> {
    data.tools
        .get(tool)
        .and_then(|outcome| outcome.data.as_ref())
        .filter(|value| value.is_object())
}

fn information(data: &MxToolboxData, tool: &str) -> Option<Value> {
    tool_object(data, tool)
        .and_then(|value| lookup(value, &["Information", "information"]))
        .cloned()
}

/// Extracts DMARC/SPF records and a blacklist summary.
///
/// Tool outcomes are read even when they failed, since error responses may
/// still carry a JSON body.
pub fn extract_mxtoolbox_security(data: Option<&MxToolboxData>) -> MxToolboxSecurity {
    let Some(data) = data else {
        return MxToolboxSecurity::default();
    };

    let blacklist_summary = tool_object(data, "blacklist")
        .and_then(Value::as_object)
        .map(|blacklist| {
            BLACKLIST_SUMMARY_KEYS
                .iter()
                .filter_map(|key| {
                    blacklist
                        .get(*key)
                        .map(|value| (key.to_string(), value.clone()))
                })
                .collect::<Vec<_>>()
        });

    MxToolboxSecurity {
        dmarc_record: information(data, "dmarc"),
        spf_record: information(data, "spf"),
        blacklist_summary,
    }
}
