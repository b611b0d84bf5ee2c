//! Request handlers.

use std::time::Duration;

use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::{ApiError, ServerState};
use crate::app::parse_domain_lines;
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::models::AggregationRecord;

/// Upload field carrying the domain list.
const FILE_FIELD: &str = "file";

/// `{"results": [...]}` response body.
#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    /// One record per requested domain, in request order
    pub results: Vec<AggregationRecord>,
}

/// Query parameters of `POST /aggregate-file`.
#[derive(Debug, Deserialize)]
pub struct FileParams {
    /// Per-request timeout in seconds; numeric strings are accepted
    pub timeout: Option<String>,
}

/// Reads a timeout in seconds from a JSON number or a numeric string.
fn parse_timeout(value: Option<&Value>) -> Result<Duration, ApiError> {
    let seconds = match value {
        None | Some(Value::Null) => DEFAULT_TIMEOUT_SECS,
        Some(Value::Number(n)) => n.as_u64().ok_or(ApiError::InvalidTimeout)?,
        Some(Value::String(text)) => text.trim().parse::<u64>().map_err(|_| ApiError::InvalidTimeout)?,
        Some(_) => return Err(ApiError::InvalidTimeout),
    };
    if seconds == 0 {
        return Err(ApiError::InvalidTimeout);
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_domains(value: Option<&Value>) -> Result<Vec<String>, ApiError> {
    let entries = match value {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(ApiError::InvalidDomains),
    };
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or(ApiError::NonStringDomain)
        })
        .collect()
}

/// Liveness check
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Landing page
pub async fn index_handler() -> Html<&'static str> {
    Html("<h1>Security Aggregator</h1>")
}

/// `POST /aggregate` with `{"domains": [...], "timeout": 30}`.
pub async fn aggregate_handler(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<ResultsResponse>, ApiError> {
    let domains = parse_domains(payload.get("domains"))?;
    let timeout = parse_timeout(payload.get("timeout"))?;

    info!("POST /aggregate: {} domain(s)", domains.len());
    let results = state.aggregator.aggregate_domains(&domains, timeout).await;
    Ok(Json(ResultsResponse { results }))
}

/// `POST /aggregate-file?timeout=30` with a multipart `file` part holding a
/// newline- or comma-separated domain list.
pub async fn aggregate_file_handler(
    State(state): State<ServerState>,
    Query(params): Query<FileParams>,
    mut multipart: Multipart,
) -> Result<Json<ResultsResponse>, ApiError> {
    let timeout = parse_timeout(params.timeout.map(Value::String).as_ref())?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
            upload = Some(bytes);
            break;
        }
    }
    let bytes = upload.ok_or(ApiError::MissingFile)?;

    // Invalid UTF-8 is replaced rather than rejected.
    let domains = parse_domain_lines(&String::from_utf8_lossy(&bytes));
    if domains.is_empty() {
        return Err(ApiError::NoDomainsInFile);
    }

    info!("POST /aggregate-file: {} domain(s)", domains.len());
    let results = state.aggregator.aggregate_domains(&domains, timeout).await;
    Ok(Json(ResultsResponse { results }))
}
