//! Domain list input.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::aggregate::normalize_domains;

/// Domains on one line: comma-separated, trimmed, blanks dropped.
/// A line starting with `#` is a comment and yields nothing.
fn domain_entries(line: &str) -> impl Iterator<Item = &str> {
    let trimmed = line.trim();
    let content = if trimmed.starts_with('#') { "" } else { trimmed };
    content
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Parses a newline- or comma-separated domain list.
///
/// `\n`, `\r` and `,` all separate entries; entries are trimmed and blanks
/// dropped. Lines starting with `#` are skipped.
pub fn parse_domain_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .flat_map(domain_entries)
        .map(str::to_string)
        .collect()
}

async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut domains = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read domain list")? {
        domains.extend(domain_entries(&line).map(str::to_string));
    }
    Ok(domains)
}

/// Reads a domain list from a file, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn read_domain_source(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        return read_lines(tokio::io::stdin()).await;
    }

    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open domain file {}", path.display()))?;
    let domains = read_lines(file).await?;
    info!("Read {} domain(s) from {}", domains.len(), path.display());
    Ok(domains)
}

/// Combines positional domains with the optional file, positional ones first.
///
/// The result is normalized the same way the aggregator normalizes its input.
///
/// # Errors
///
/// Returns an error if the domain file cannot be read.
pub async fn collect_domains(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut domains = args.to_vec();
    if let Some(path) = file {
        domains.extend(read_domain_source(path).await?);
    }
    Ok(normalize_domains(&domains))
}
