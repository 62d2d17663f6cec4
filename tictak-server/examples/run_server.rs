//! Example to run the TICTAK server standalone
//!
//! Run with: cargo run -p tictak-server --example run_server

use tictak_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting TICTAK server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/", config.port);

    run_server(config).await
}
