//! Supported-network allow-list
//!
//! The chain id decoded from a transaction must resolve against this fixed
//! set before anything downstream runs. Lookup is pure and total over the
//! allow-list; everything else is `UnsupportedNetwork`.

use crate::error::ExecuteError;
use ethers::types::H256;
use serde::Serialize;
use std::fmt;

/// A supported network and its RPC/explorer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Sepolia,
    Base,
    Polygon,
}

impl Network {
    /// The full supported set, in allow-list order
    pub const SUPPORTED: &'static [Network] = &[
        Network::Mainnet,
        Network::Sepolia,
        Network::Base,
        Network::Polygon,
    ];

    /// Resolve a decoded chain id against the allow-list
    pub fn from_chain_id(chain_id: u64) -> Result<Self, ExecuteError> {
        match chain_id {
            1 => Ok(Network::Mainnet),
            11155111 => Ok(Network::Sepolia),
            8453 => Ok(Network::Base),
            137 => Ok(Network::Polygon),
            other => Err(ExecuteError::UnsupportedNetwork(other)),
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Sepolia => 11155111,
            Network::Base => 8453,
            Network::Polygon => 137,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Base => "base",
            Network::Polygon => "polygon",
        }
    }

    /// Public RPC endpoint used when no override is configured
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://eth.llamarpc.com",
            Network::Sepolia => "https://rpc.sepolia.org",
            Network::Base => "https://mainnet.base.org",
            Network::Polygon => "https://polygon-rpc.com",
        }
    }

    /// Block-explorer URL for a transaction hash on this network
    pub fn explorer_tx_url(&self, tx_hash: H256) -> String {
        let base = match self {
            Network::Mainnet => "https://etherscan.io/tx",
            Network::Sepolia => "https://sepolia.etherscan.io/tx",
            Network::Base => "https://basescan.org/tx",
            Network::Polygon => "https://polygonscan.com/tx",
        };
        format!("{}/{:?}", base, tx_hash)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
