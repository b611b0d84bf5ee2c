//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::constants::{DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECS};
use super::types::{LogFormat, LogLevel};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Aggregate two domains and print pretty JSON
/// security_aggregator aggregate example.com example.org
///
/// # Read domains from a file, write compact JSON without summaries
/// security_aggregator aggregate --file domains.txt --compact --no-summary --output out.json
///
/// # Read domains from stdin
/// cat domains.txt | security_aggregator aggregate --file -
///
/// # Serve the HTTP API on port 8000
/// security_aggregator serve --port 8000
///
/// # Print a .env template
/// security_aggregator env-example > .env
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "security_aggregator",
    version,
    about = "Aggregates BuiltWith, MXToolbox and VirusTotal intelligence for domains."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate provider intelligence for one or more domains
    Aggregate(AggregateArgs),
    /// Serve the aggregation HTTP API
    Serve(ServeArgs),
    /// Print a template .env file with every supported key
    EnvExample,
}

/// Options for `aggregate`.
#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Domains to look up
    pub domains: Vec<String>,

    /// File with domains, one per line or comma-separated (`-` reads stdin). Blank lines and `#` comments are skipped.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write JSON to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Leave out the per-domain summary block
    #[arg(long)]
    pub no_summary: bool,

    /// Emit compact single-line JSON
    #[arg(long)]
    pub compact: bool,
}

/// Options for `serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_SERVER_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aggregate_defaults() {
        let cli = Cli::try_parse_from(["security_aggregator", "aggregate", "example.com"]).unwrap();
        let Command::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(args.domains, vec!["example.com"]);
        assert_eq!(args.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(args.file.is_none());
        assert!(!args.no_summary);
        assert!(!args.compact);
        assert!(matches!(cli.log_level, LogLevel::Info));
    }

    #[test]
    fn test_parse_aggregate_flags() {
        let cli = Cli::try_parse_from([
            "security_aggregator",
            "aggregate",
            "--file",
            "-",
            "--timeout",
            "5",
            "--no-summary",
            "--compact",
            "--output",
            "out.json",
            "--log-format",
            "json",
        ])
        .unwrap();
        let Command::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert!(args.domains.is_empty());
        assert_eq!(args.file, Some(PathBuf::from("-")));
        assert_eq!(args.timeout, 5);
        assert!(args.no_summary && args.compact);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn test_parse_env_example() {
        let cli = Cli::try_parse_from(["security_aggregator", "env-example"]).unwrap();
        assert!(matches!(cli.command, Command::EnvExample));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["security_aggregator", "serve"]).unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host, DEFAULT_SERVER_HOST);
        assert_eq!(args.port, DEFAULT_SERVER_PORT);

        let cli = Cli::try_parse_from([
            "security_aggregator",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 9000);
        assert!(Cli::try_parse_from(["security_aggregator", "serve", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(Cli::try_parse_from(["security_aggregator", "aggregate", "--timeout", "soon"]).is_err());
    }
}
