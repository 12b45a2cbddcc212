//! a2a-relay - command-line client for remote A2A agents
//!
//! Prints the single message produced by each operation on stdout. Logs go to
//! stderr.

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use a2a_relay_config::{load_dotenv, RelayConfig};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    load_dotenv()?;
    let config = RelayConfig::load(args.config.as_deref())
        .context("Failed to load a2a-relay configuration")?;

    initialize_tracing(&config)?;

    cli::run(&args.command, &config).await
}

/// `RUST_LOG` wins; otherwise tracing is on only when `[debug]` enables it.
fn initialize_tracing(config: &RelayConfig) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if config.debug.enable_tracing {
        EnvFilter::new(config.debug.filter_directive())
    } else {
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize tracing: {err}"))?;

    if config.debug.enable_tracing {
        tracing::info!(
            "Debug tracing enabled: filter={}, level={}",
            config.debug.filter_directive(),
            config.debug.trace_level
        );
    }

    Ok(())
}
