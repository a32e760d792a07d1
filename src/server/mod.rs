//! Server core functionality
//!
//! This module contains the HTTP server, its routes and its configuration.

pub mod config;
pub mod core;
pub mod routes;

pub use self::config::ServerConfig;
pub use self::core::Server;
pub use routes::router;
