//! Sandboxed filesystem API for a local development server.
//!
//! Exposes list, read and write operations over a single base directory so a
//! browser-based tool can edit project assets without reaching anything
//! outside that directory.

pub mod codec;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod utils;

pub use server::{Server, ServerConfig};
