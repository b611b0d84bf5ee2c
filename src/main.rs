//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `security_aggregator` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use security_aggregator::app::run_aggregate;
use security_aggregator::config::{Cli, Command, ServeArgs, ENV_EXAMPLE};
use security_aggregator::initialization::init_logger_with;
use security_aggregator::server::{start_server, ServerState};
use security_aggregator::{Aggregator, AggregatorConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load provider keys from .env: current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Command::EnvExample = cli.command {
        print!("{ENV_EXAMPLE}");
        return Ok(());
    }

    let config = match AggregatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("security_aggregator error: {e}");
            process::exit(2);
        }
    };

    let args = match cli.command {
        Command::Aggregate(args) => args,
        Command::Serve(args) => return serve(&args, &config).await,
        Command::EnvExample => return Ok(()),
    };

    match run_aggregate(&args, &config).await {
        Ok(report) => {
            eprintln!(
                "✅ Aggregated {} domain{} ({} provider results succeeded, {} failures) in {:.1}s",
                report.domains,
                if report.domains == 1 { "" } else { "s" },
                report.provider_successes,
                report.failures,
                report.elapsed_seconds
            );
            if let Some(path) = report.output {
                eprintln!("Results saved in {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("security_aggregator error: {e:#}");
            process::exit(1);
        }
    }
}

async fn serve(args: &ServeArgs, config: &AggregatorConfig) -> Result<()> {
    let aggregator = Aggregator::from_config(config).context("Failed to initialize HTTP client")?;
    if let Err(e) = start_server(&args.host, args.port, ServerState::new(aggregator)).await {
        eprintln!("security_aggregator error: {e:#}");
        process::exit(1);
    }
    Ok(())
}
