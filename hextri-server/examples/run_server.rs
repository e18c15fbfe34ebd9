//! Example to run the HEXTRI server standalone
//!
//! Run with: cargo run -p hextri-server --example run_server

use hextri_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig {
        state_dir: Some(std::env::temp_dir().join("hextri-demo")),
        ..Default::default()
    };

    println!("Starting HEXTRI server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/api/board", config.port);

    run_server(config).await
}
