//! Network collaborator abstraction
//!
//! Everything that touches the chain goes through `ChainClient`, so the
//! executor can run against the HTTP provider in production and a mock in
//! tests. The trait mirrors exactly the four operations the pipeline
//! needs: nonce lookup, broadcast, confirmation wait, read-only call.

mod http;

pub use http::HttpChainClient;

use async_trait::async_trait;
use ethers::types::{Address, TransactionReceipt, H256, U256};
use thiserror::Error;

/// Failures surfaced by a `ChainClient` implementation
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc request failed: {0}")]
    Request(String),

    /// The transaction did not reach the requested confirmation depth
    /// before the client's timeout, or was dropped from the pool.
    #[error("transaction not confirmed to depth {0} before the timeout")]
    ConfirmationTimeout(usize),
}

/// The network operations the pipeline depends on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current on-chain transaction count (next expected nonce) for an address
    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError>;

    /// Submit raw signed transaction bytes, returning the transaction hash
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, RpcError>;

    /// Block until the transaction is `depth` blocks deep, returning its receipt
    async fn wait_for_confirmations(
        &self,
        tx_hash: H256,
        depth: usize,
    ) -> Result<TransactionReceipt, RpcError>;

    /// Read-only contract call, returning the raw ABI-encoded response
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError>;
}
