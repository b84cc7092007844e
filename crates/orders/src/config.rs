// crates/orders/src/config.rs
//! Command-line and environment configuration for the server binary.
//!
//! The processing delay is deliberately absent: it is fixed at
//! [`crate::state::PROCESSING_DELAY`].

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "async-orders",
    version,
    about = "Asynchronous request-reply order service"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "ASYNC_ORDERS_HOST")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "ASYNC_ORDERS_PORT")]
    pub port: Option<u16>,

    /// tracing-subscriber filter directive
    #[arg(
        long,
        default_value = "warn,async_orders_server=info",
        env = "RUST_LOG"
    )]
    pub log_filter: String,
}

impl ServerConfig {
    /// Resolve the port: flag or `ASYNC_ORDERS_PORT`, then `PORT`, then the default.
    pub fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port())
    }
}
