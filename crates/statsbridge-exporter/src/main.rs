//! statsbridge
//!
//! - Synthetic target: /test200, /test500, /stats
//! - Exporter: /metrics (pulls the target's /stats on every scrape), /healthz, /readyz
//! - SIGINT/SIGTERM: stop accepting, bounded drain, exit

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use statsbridge_exporter::{config, lifecycle};

#[derive(Debug, Parser)]
#[command(
    name = "statsbridge",
    version,
    about = "Synthetic HTTP target and its Prometheus exporter"
)]
struct Args {
    /// YAML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => config::load_from_file(path),
        None => Ok(config::BridgeConfig::default()),
    };

    let result = match cfg {
        Ok(cfg) => lifecycle::run(cfg, lifecycle::shutdown_signal()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            tracing::info!("exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "statsbridge failed");
            ExitCode::FAILURE
        }
    }
}
