//! JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::AggregationRecord;

#[derive(Serialize)]
struct ResultsDocument<'a> {
    results: &'a [AggregationRecord],
}

/// Serializes records as `{"results": [...]}`.
pub fn render_results(records: &[AggregationRecord], pretty: bool) -> serde_json::Result<String> {
    let document = ResultsDocument { results: records };
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}

/// Writes rendered output to a file, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, format!("{rendered}\n"))
            .await
            .with_context(|| format!("Failed to write results to {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
