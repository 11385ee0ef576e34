//! Tujifund chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tujifund-chat
//! cargo run --bin tujifund-chat -- --host 0.0.0.0 --port 3000 --seed data/seed.example.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tujifund_chat::{
    infrastructure::{
        message_pusher::ConnectionManager,
        repository::{InMemoryChatRepository, SeedData},
    },
    ui::Server,
};
use tujifund_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tujifund-chat")]
#[command(about = "Real-time chama messaging server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "TUJIFUND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "TUJIFUND_PORT", default_value = "8080")]
    port: u16,

    /// JSON file with users, chamas and memberships to preload
    #[arg(short = 's', long, env = "TUJIFUND_SEED")]
    seed: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "TUJIFUND_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // 1. Create Repository (in-memory database)
    let clock = Arc::new(SystemClock);
    let repository = match &args.seed {
        Some(path) => {
            let loaded = match SeedData::from_file(path).await {
                Ok(seed) => InMemoryChatRepository::from_seed(seed, clock).await,
                Err(e) => Err(e),
            };
            match loaded {
                Ok(repository) => {
                    tracing::info!(
                        users = repository.count_users().await,
                        "Loaded seed data from {}",
                        path.display()
                    );
                    repository
                }
                Err(e) => {
                    tracing::error!("Failed to load seed data from {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::warn!("No seed data given; every auth will fail until users exist");
            InMemoryChatRepository::new(clock)
        }
    };

    // 2. Create MessagePusher (connection registry and room index)
    let connection_manager = Arc::new(ConnectionManager::new());

    // 3. Create and run the server
    let server = Server::new(Arc::new(repository), connection_manager);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
