use commitly_core::MemoryStorage;
use commitly_lib::adapters::StubContentGenerator;
use commitly_lib::commands::{run, Cli};
use commitly_lib::config::Config;
use commitly_lib::error::CliError;
use commitly_lib::state::AppState;
use clap::Parser;
use std::sync::Arc;

/// App state over in-memory storage and mock content, with default config.
#[allow(dead_code)]
pub fn test_state() -> AppState {
    let config = Config::from_lookup(|_| None).expect("default config");
    AppState::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(StubContentGenerator::new()),
        Arc::new(config),
    )
}

/// Parses `args` as a command line and runs it, returning what was printed.
#[allow(dead_code)]
pub async fn exec(state: &AppState, args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("commitly").chain(args.iter().copied()))
        .expect("valid command line");
    let mut out = Vec::new();
    run(cli.command, state, &mut out).await?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}
