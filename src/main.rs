use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arbitrum_analytics_mcp::{arbiscan::ArbiscanClient, claude::ClaudeClient, config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    // stdout carries the JSON-RPC responses, so all logging goes to stderr.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Arbitrum Analytics Service v{}...", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env()?;
    let arbiscan = ArbiscanClient::new(&config)?;
    let claude = ClaudeClient::new(&config);

    server::run(arbiscan, claude).await?;

    Ok(())
}
