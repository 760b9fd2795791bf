//! Server configuration loaded from the environment.

use std::net::SocketAddr;

/// Runtime configuration for the workflow server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_addr: SocketAddr,
    /// Days before a compliance expiry date that the monitor starts
    /// flagging the check as expiring.
    pub warning_window_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `CLAIMGATE_LISTEN_ADDR` (default `0.0.0.0:8080`)
    /// - `CLAIMGATE_WARNING_WINDOW_DAYS` (default `30`)
    pub fn from_env() -> Result<Self, String> {
        let listen_addr = match std::env::var("CLAIMGATE_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| format!("invalid CLAIMGATE_LISTEN_ADDR '{raw}': {e}"))?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let warning_window_days = match std::env::var("CLAIMGATE_WARNING_WINDOW_DAYS") {
            Ok(raw) => {
                let days = raw
                    .parse::<i64>()
                    .map_err(|e| format!("invalid CLAIMGATE_WARNING_WINDOW_DAYS '{raw}': {e}"))?;
                if days < 0 {
                    return Err(format!(
                        "CLAIMGATE_WARNING_WINDOW_DAYS must be non-negative, got {days}"
                    ));
                }
                days
            }
            Err(_) => 30,
        };

        Ok(Self {
            listen_addr,
            warning_window_days,
        })
    }
}
