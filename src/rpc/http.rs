//! `ChainClient` over an ethers HTTP JSON-RPC provider

use super::{ChainClient, RpcError};
use crate::config::Config;
use crate::networks::Network;
use async_trait::async_trait;
use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionReceipt, TransactionRequest, H256, U256};
use std::time::Duration;

/// HTTP JSON-RPC implementation of the network collaborator.
///
/// The confirmation wait is bounded by the configured timeout; the bound
/// is this client's policy, the executor itself never gives up on a
/// broadcast transaction.
pub struct HttpChainClient {
    provider: Provider<Http>,
    confirmation_timeout: Duration,
}

impl HttpChainClient {
    pub fn new(rpc_url: &str, confirmation_timeout: Duration) -> Result<Self, RpcError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| RpcError::Request(format!("invalid rpc url '{}': {}", rpc_url, e)))?;
        Ok(Self {
            provider,
            confirmation_timeout,
        })
    }

    /// Build a client for a resolved network, honoring RPC URL overrides
    /// from the environment.
    pub fn for_network(config: &Config, network: Network) -> Result<Self, RpcError> {
        let url = config.rpc_url(network);
        log::info!("[Rpc] Using {} endpoint {}", network, url);
        Self::new(&url, config.confirmation_timeout)
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn transaction_count(&self, address: Address) -> Result<U256, RpcError> {
        self.provider
            .get_transaction_count(address, None)
            .await
            .map_err(|e| RpcError::Request(e.to_string()))
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<H256, RpcError> {
        let pending = self
            .provider
            .send_raw_transaction(Bytes::from(raw.to_vec()))
            .await
            .map_err(|e| RpcError::Request(e.to_string()))?;
        Ok(*pending)
    }

    async fn wait_for_confirmations(
        &self,
        tx_hash: H256,
        depth: usize,
    ) -> Result<TransactionReceipt, RpcError> {
        let wait = PendingTransaction::new(tx_hash, &self.provider).confirmations(depth);

        match tokio::time::timeout(self.confirmation_timeout, wait).await {
            Err(_elapsed) => Err(RpcError::ConfirmationTimeout(depth)),
            Ok(Err(e)) => Err(RpcError::Request(e.to_string())),
            // A pending transaction resolving without a receipt means it
            // was dropped before mining.
            Ok(Ok(None)) => Err(RpcError::ConfirmationTimeout(depth)),
            Ok(Ok(Some(receipt))) => Ok(receipt),
        }
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError> {
        let tx = TypedTransaction::Legacy(TransactionRequest::new().to(to).data(data));
        let output = self
            .provider
            .call(&tx, None)
            .await
            .map_err(|e| RpcError::Request(e.to_string()))?;
        Ok(output.to_vec())
    }
}
