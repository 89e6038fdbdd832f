//! `telebot-proxy` binary entrypoint.
//!
//! Loads configuration (optional YAML file, environment, CLI flags) and starts
//! the Actix server.

use std::path::PathBuf;

use clap::Parser;
use telebot_proxy::{serve, ProxyConfig};

#[derive(Parser)]
#[command(name = "telebot-proxy")]
#[command(version, about = "AI proxy for Telegram bot development", long_about = None)]
struct Cli {
    /// Path to a telebot.yml with non-secret settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Respect `RUST_LOG` if set; otherwise default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ProxyConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    serve(config).await
}
