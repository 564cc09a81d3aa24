//! Environment-driven configuration

use crate::executor::DEFAULT_CONFIRMATION_DEPTH;
use crate::networks::Network;
use std::env;
use std::time::Duration;

#[derive(Clone)]
pub struct Config {
    /// Confirming blocks required before a broadcast counts as mined
    pub confirmation_depth: usize,
    /// Upper bound on the confirmation wait
    pub confirmation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            confirmation_depth: env::var("TXCAST_CONFIRMATIONS")
                .unwrap_or_else(|_| DEFAULT_CONFIRMATION_DEPTH.to_string())
                .parse()
                .expect("TXCAST_CONFIRMATIONS must be a valid number"),
            confirmation_timeout: Duration::from_secs(
                env::var("TXCAST_CONFIRMATION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .expect("TXCAST_CONFIRMATION_TIMEOUT_SECS must be a valid number"),
            ),
        }
    }

    /// RPC endpoint for a network: `RPC_URL_<NETWORK>` override or the
    /// network's public default.
    pub fn rpc_url(&self, network: Network) -> String {
        let key = format!("RPC_URL_{}", network.name().to_uppercase());
        env::var(&key).unwrap_or_else(|_| network.default_rpc_url().to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirmation_depth: DEFAULT_CONFIRMATION_DEPTH,
            confirmation_timeout: Duration::from_secs(120),
        }
    }
}
