//! Server process error definitions.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the server process
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The configured address is not a valid socket address
    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    /// The accept loop terminated with an I/O error
    #[error("Server terminated: {0}")]
    Serve(#[from] std::io::Error),
}
