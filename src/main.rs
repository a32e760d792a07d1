//! Sandbox FS Server - Entry Point
//!
//! Serves the list/read/write file API over the configured base directory.

use log::{error, info};
use std::process;

use sandbox_fs_server::utils::logging::setup_logging;
use sandbox_fs_server::{Server, ServerConfig};

#[tokio::main]
async fn main() {
    setup_logging();

    info!("Launching sandbox filesystem server...");

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            error!("Server startup failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server stopped with error: {}", e);
        process::exit(1);
    }
}
