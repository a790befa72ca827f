//! services/cli/src/bin/commitly.rs

use clap::Parser;
use commitly_lib::{commands::{run, Cli}, config::Config, error::CliError, state::AppState};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    debug!("Configuration loaded");

    // --- 2. Initialize Adapters & Store ---
    let state = AppState::from_config(config);
    state.store.init()?;

    // --- 3. Run the Command ---
    let mut stdout = std::io::stdout().lock();
    run(cli.command, &state, &mut stdout).await?;
    debug!("Command finished");

    Ok(())
}
