//! Run the browse API in the foreground.

use clap::Args;

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;

use crate::output;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen on this port instead of `[server] port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Listen on this address instead of `[server] host`
    #[arg(long)]
    pub host: Option<String>,

    /// Run scheduled folder index rebuilds regardless of `[worker] enabled`
    #[arg(long)]
    pub with_worker: bool,
}

pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if args.with_worker {
        config.worker.enabled = true;
    }

    output::print_kv("Listening on", &config.server.bind_address());
    output::print_kv("Store provider", &format!("{:?}", config.database.provider));
    output::print_kv("Mixed content", &format!("{:?}", config.navigator.mixed_content));
    if config.worker.enabled {
        output::print_kv("Rebuild schedule", &config.worker.rebuild_cron);
    }

    let stores = super::open_stores(&config).await?;
    trackhub_api::run_server(config, stores).await
}
