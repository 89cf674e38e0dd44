use auth::AuthService;
use clap::{Parser, Subcommand};
use engine::TradeEngine;
use price_client::BinanceClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_server::AppState;

/// The main entry point for the Coinfolio trading service.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    // Initialize tracing once, here, for the whole application.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Err(e) = handle_serve(args).await {
                eprintln!("Error while serving: {}", e);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A per-account cash-and-asset trading service for crypto portfolios.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides the bind address from config.toml (e.g. "0.0.0.0:8000").
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Serve Command Logic
// ==============================================================================

/// Wires the components together and runs the server until shutdown.
async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config()?;
    tracing::info!(oracle = %config.oracle.base_url, "Configuration loaded.");

    let addr = match args.addr {
        Some(addr) => addr,
        None => format!("{}:{}", config.server.host, config.server.port).parse()?,
    };

    let oracle = BinanceClient::new(&config.oracle)?;
    let engine = TradeEngine::new(Arc::new(oracle));
    let auth = AuthService::new(&config.auth);

    let state = Arc::new(AppState { engine, auth });
    web_server::run_server(addr, state).await
}
