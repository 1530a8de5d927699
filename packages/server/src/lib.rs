//! Multi-room WebSocket chat server library.
//!
//! This library provides the session/room presence engine and the axum server
//! that exposes it over WebSocket and a small read-only HTTP API.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ServerArgs, ServerConfig};
pub use error::ServerError;
pub use ui::run as run_server;
