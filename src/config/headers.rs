//! HTTP header and query parameter name constants.
//!
//! Provider APIs each expect credentials in a different place; the names are
//! collected here so adapters and tests agree on them.

/// VirusTotal API key header.
pub const HEADER_VT_API_KEY: &str = "x-apikey";
/// Second-stage MXToolbox credential header.
pub const HEADER_X_API_KEY: &str = "X-API-Key";

/// Third-stage MXToolbox credential query parameter.
pub const PARAM_MXTOOLBOX_API_KEY: &str = "apikey";
/// BuiltWith credential query parameter.
pub const PARAM_BUILTWITH_KEY: &str = "KEY";
/// BuiltWith lookup target query parameter.
pub const PARAM_BUILTWITH_LOOKUP: &str = "LOOKUP";
