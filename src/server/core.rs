use log::{error, info, warn};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::server::config::ServerConfig;
use crate::server::routes::router;
use crate::storage::Sandbox;
use crate::storage::validation::validate_write_path;

pub struct Server {
    listener: TcpListener,
    sandbox: Arc<Sandbox>,
}

impl Server {
    /// Prepares the base directory and binds the listener.
    pub async fn new(config: ServerConfig) -> io::Result<Self> {
        let base_dir = config.base_dir_path();

        if let Err(e) = std::fs::create_dir_all(&base_dir) {
            warn!("Failed to create base directory {}: {}", base_dir.display(), e);
        }
        let base_dir = base_dir.canonicalize().inspect_err(|e| {
            error!("Base directory {} is not usable: {}", config.base_dir, e);
        })?;

        if validate_write_path(&base_dir).is_err() {
            warn!(
                "Base directory {} contains characters outside the write allow-list; all writes will be rejected",
                base_dir.display()
            );
        }

        let sandbox = Sandbox::new(&base_dir)?
            .with_strip_prefix(config.strip_prefix.clone())
            .with_limits(config.list_limits())
            .with_symlink_check(config.reject_symlink_escapes);

        let addr = config.socket_addr();
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => {
                info!("Server bound to {}", listener.local_addr()?);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", addr, e);
                return Err(e);
            }
        };

        info!("Base directory: {}", base_dir.display());

        Ok(Self {
            listener,
            sandbox: Arc::new(sandbox),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until the listener fails.
    pub async fn start(self) -> io::Result<()> {
        info!("Starting sandbox filesystem server on {}", self.local_addr()?);
        axum::serve(self.listener, router(self.sandbox)).await
    }
}
