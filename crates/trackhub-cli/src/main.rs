//! `trackhub` administration tool.
//!
//! Logs go to stderr so `--format json` output on stdout stays parseable.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = Cli::parse().execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
