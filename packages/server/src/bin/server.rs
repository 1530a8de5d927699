//! Multi-room WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server -- --port 8080
//! ```

use clap::Parser;
use parlor_server::{ServerArgs, ServerConfig};
use parlor_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::try_from(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    // Run the server
    if let Err(e) = parlor_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
