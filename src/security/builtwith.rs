//! Security vendor detection in BuiltWith technology profiles.
//!
//! BuiltWith nests technologies as `Results[0].Result.Paths[*].Technologies[*]`
//! and is inconsistent about key casing, so every level is read in both
//! PascalCase and lowercase.

use serde_json::Value;

use super::types::SecurityVendor;
use crate::utils::json::{lookup, lookup_array, lookup_text};

/// Substrings that mark a category label or technology name as security-related.
pub const SECURITY_KEYWORDS: &[&str] = &[
    "security",
    "waf",
    "firewall",
    "ddos",
    "captcha",
    "bot",
    "malware",
    "threat",
    "vulnerability",
    "scan",
    "antivirus",
    "tls",
    "ssl",
    "sso",
    "auth",
    "iam",
];

/// Technology names that are security vendors regardless of category.
pub const KNOWN_SECURITY_VENDORS: &[&str] = &[
    "Cloudflare",
    "Imperva",
    "Akamai",
    "F5",
    "Fortinet",
    "Barracuda",
    "Reblaze",
    "Sucuri",
    "Wordfence",
    "PerimeterX",
    "Human Security",
    "Fastly",
    "AWS WAF",
    "Azure Front Door",
    "Google reCAPTCHA",
    "hCaptcha",
    "Cloudflare Bot Management",
    "Datadog Security",
];

fn contains_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    SECURITY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Decides whether a technology is security-relevant.
///
/// Checked in order: any category contains a keyword, the name contains a
/// keyword, the name is an exact allow-list match.
pub fn is_security_relevant(name: &str, categories: &[String]) -> bool {
    if categories.iter().any(|category| contains_keyword(category)) {
        return true;
    }
    if !name.is_empty() && contains_keyword(name) {
        return true;
    }
    KNOWN_SECURITY_VENDORS.contains(&name)
}

fn category_labels(tech: &Value) -> Vec<String> {
    lookup_array(tech, &["Categories", "categories"])
        .iter()
        .filter_map(|category| match category {
            Value::String(label) => Some(label.trim()),
            other => lookup_text(other, &["Name", "name"]),
        })
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lists security-relevant technologies from a BuiltWith payload.
///
/// Order and duplicates are preserved. Anything that does not match the
/// expected shape contributes nothing.
pub fn extract_builtwith_security(data: Option<&Value>) -> Vec<SecurityVendor> {
    let Some(data) = data else {
        return Vec::new();
    };
    let Some(first) = lookup_array(data, &["Results", "results"]).first() else {
        return Vec::new();
    };
    let Some(result) = lookup(first, &["Result", "result"]) else {
        return Vec::new();
    };

    let mut vendors = Vec::new();
    for path in lookup_array(result, &["Paths", "paths"]) {
        for tech in lookup_array(path, &["Technologies", "technologies"]) {
            let name = lookup_text(tech, &["Name", "name"]).unwrap_or_default();
            let categories = category_labels(tech);
            if !name.is_empty() && is_security_relevant(name, &categories) {
                vendors.push(SecurityVendor {
                    name: name.to_string(),
                    categories,
                });
            }
        }
    }
    vendors
}

/// Counts every technology across all paths, security-relevant or not.
pub fn count_technologies(data: Option<&Value>) -> usize {
    let Some(first) = data.and_then(|d| lookup_array(d, &["Results", "results"]).first()) else {
        return 0;
    };
    let Some(result) = lookup(first, &["Result", "result"]) else {
        return 0;
    };
    lookup_array(result, &["Paths", "paths"])
        .iter()
        .map(|path| lookup_array(path, &["Technologies", "technologies"]).len())
        .sum()
}
