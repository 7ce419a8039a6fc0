//! Entry point for werewolf, a terminal character agent driven by LLM tool calls.
//!
//! This binary loads environment variables, sets up diagnostic logging,
//! parses CLI arguments via [`cli`], and dispatches to the chosen subcommand.

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod conversation;
mod entity;
mod message;
mod output;
mod persona;
mod provider;
mod tools;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Runs the werewolf CLI.
///
/// Loads `.env` files (silently ignored if absent) before anything reads
/// the environment, so `MODEL_RUNNER_*` values can live there.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = cli::parse();
    cli::run(cli).await
}

/// Diagnostics go to stderr so they never mix with the streamed reply.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(constants::ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
