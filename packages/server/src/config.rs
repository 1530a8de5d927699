//! Command line configuration.

use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::{error::ServerError, usecase::PresenceSettings};

#[derive(Debug, Clone, Parser)]
#[command(name = "parlor-server")]
#[command(about = "Multi-room chat server with presence tracking and broadcast fan-out")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// How long a typing/acting indicator stays up, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub indicator_expiry_ms: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub presence: PresenceSettings,
}

impl ServerConfig {
    pub fn new(addr: SocketAddr, presence: PresenceSettings) -> Self {
        Self { addr, presence }
    }
}

impl TryFrom<&ServerArgs> for ServerConfig {
    type Error = ServerError;

    fn try_from(args: &ServerArgs) -> Result<Self, Self::Error> {
        let raw = format!("{}:{}", args.host, args.port);
        let addr = raw
            .parse::<SocketAddr>()
            .map_err(|_| ServerError::InvalidAddress(raw))?;
        Ok(Self {
            addr,
            presence: PresenceSettings {
                indicator_expiry: Duration::from_millis(args.indicator_expiry_ms),
            },
        })
    }
}
