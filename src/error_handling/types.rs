//! Error type definitions.
//!
//! This module defines the startup error types and the failure categories
//! used to summarize provider outcomes.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for configuration resolution.
///
/// A missing credential is not a configuration error: it only disables the
/// affected adapter and is reported inside that provider's result.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An endpoint override could not be parsed as an http(s) URL.
    #[error("{key} is not a valid base URL ({value}): {reason}")]
    InvalidBaseUrl {
        /// Configuration key holding the bad value
        key: &'static str,
        /// The rejected value
        value: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The MXToolbox auth header override is not a legal header name.
    #[error("{key} is not a valid HTTP header name: {value}")]
    InvalidHeaderName {
        /// Configuration key holding the bad value
        key: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Categories of failed provider or sub-tool outcomes.
///
/// Used only for end-of-run statistics; the records themselves carry the
/// human-readable error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Provider credential not configured
    MissingCredential,
    /// Request never reached the provider (DNS, connect, timeout, body read)
    Transport,
    /// 401 Unauthorized
    HttpUnauthorized,
    /// 403 Forbidden
    HttpForbidden,
    /// 404 Not Found
    HttpNotFound,
    /// 429 Too Many Requests
    HttpTooManyRequests,
    /// Any 5xx response
    HttpServerError,
    /// Any other non-2xx response
    HttpOtherError,
    /// Adapter task faulted before producing a result
    UnexpectedFault,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::MissingCredential => "Missing API credential",
            FailureKind::Transport => "Transport error (DNS/connect/timeout)",
            FailureKind::HttpUnauthorized => "HTTP 401 Unauthorized",
            FailureKind::HttpForbidden => "HTTP 403 Forbidden",
            FailureKind::HttpNotFound => "HTTP 404 Not Found",
            FailureKind::HttpTooManyRequests => "HTTP 429 Too Many Requests",
            FailureKind::HttpServerError => "HTTP 5xx Server Error",
            FailureKind::HttpOtherError => "Other HTTP error",
            FailureKind::UnexpectedFault => "Unexpected adapter fault",
        }
    }
}
