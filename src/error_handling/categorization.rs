//! Failure categorization.
//!
//! Maps provider results and sub-tool outcomes onto [`FailureKind`] so a run
//! can be summarized without parsing log output.

use super::types::FailureKind;
use crate::models::{FetchOutcome, ProviderResult};

/// Categorizes an HTTP status code (0 = transport failure).
pub fn categorize_status(status: u16) -> FailureKind {
    match status {
        0 => FailureKind::Transport,
        401 => FailureKind::HttpUnauthorized,
        403 => FailureKind::HttpForbidden,
        404 => FailureKind::HttpNotFound,
        429 => FailureKind::HttpTooManyRequests,
        500..=599 => FailureKind::HttpServerError,
        _ => FailureKind::HttpOtherError,
    }
}

/// Categorizes a failed sub-tool outcome. Returns `None` on success.
pub fn categorize_outcome(outcome: &FetchOutcome) -> Option<FailureKind> {
    if outcome.success {
        return None;
    }
    Some(categorize_status(outcome.status_code))
}

/// Categorizes a failed provider result. Returns `None` on success.
///
/// Results without a status code never issued a request themselves: either the
/// credential was missing or the adapter task faulted.
pub fn categorize_provider_result(result: &ProviderResult) -> Option<FailureKind> {
    if result.success {
        return None;
    }
    match result.status_code {
        Some(status) => Some(categorize_status(status)),
        None if result.credential_missing => Some(FailureKind::MissingCredential),
        None => Some(FailureKind::UnexpectedFault),
    }
}
