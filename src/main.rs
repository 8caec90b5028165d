//! Link-Sweep main entry point
//!
//! This is the command-line interface that starts the broken link checker
//! service.

use anyhow::Context;
use clap::Parser;
use link_sweep::config::load_config_or_default;
use link_sweep::server::serve;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Sweep: a broken link finder for whole websites
///
/// Starts an HTTP service that crawls a site from a seed URL, checks every
/// link it finds, and reports which ones are broken.
#[derive(Parser, Debug)]
#[command(name = "link-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A broken link checker service", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configuration file
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    match &cli.config {
        Some(path) => tracing::info!("Configuration loaded from: {}", path.display()),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    serve(&config).await.context("server terminated with an error")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` wins over the verbosity flags when it is set.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            // Only show errors
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("link_sweep=info,warn"),
                1 => EnvFilter::new("link_sweep=debug,info"),
                2 => EnvFilter::new("link_sweep=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
