use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use huddle_api::{ApiConfig, BotApiClient};

/// MCP server that drives meeting bots through a bot-management API.
#[derive(Debug, Parser)]
#[command(name = "huddle", version, about = "Meeting-bot MCP server (stdio transport)")]
struct Cli {
    /// Base URL of the bot-management API; overrides MEETING_BOT_API_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// API token; overrides MEETING_BOT_API_KEY. Omit for unauthenticated mode.
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ApiConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }

    let client = BotApiClient::new(config)?;
    huddle_mcp::serve_stdio(Arc::new(client)).await
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    // stdout carries the MCP transport; diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
