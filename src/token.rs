//! Best-effort ERC-20 transfer interpretation
//!
//! Runs independently of the nonce/broadcast control flow. A transaction
//! whose call data matches `transfer(address,uint256)` against a contract
//! that answers `name()` and `decimals()` gets a token attachment; any
//! failure along the way degrades to no attachment. The failure reason is
//! kept as a typed error for diagnostics but never reaches the caller.

use crate::decoder::ParsedTransaction;
use crate::erc20;
use crate::result::TokenTransferInfo;
use crate::rpc::{ChainClient, RpcError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("transaction carries no contract call data")]
    NoCallData,

    #[error("call data does not match transfer(address,uint256)")]
    SelectorMismatch,

    #[error("transfer call data: {0}")]
    Calldata(String),

    #[error("token metadata query failed: {0}")]
    Metadata(#[from] RpcError),

    #[error("token metadata response: {0}")]
    BadResponse(String),
}

/// Interpret a transaction's call data as an ERC-20 transfer.
///
/// Returns `None` (never an error) when the transaction is not a
/// well-behaved token transfer; the reason is logged at debug level.
pub async fn decode_token_transfer(
    client: &dyn ChainClient,
    tx: &ParsedTransaction,
) -> Option<TokenTransferInfo> {
    match try_decode(client, tx).await {
        Ok(info) => {
            log::debug!(
                "[TokenDecode] {} transfer of {} to {:?}",
                info.name,
                info.amount,
                info.recipient
            );
            Some(info)
        }
        Err(reason) => {
            log::debug!("[TokenDecode] no token attachment: {}", reason);
            None
        }
    }
}

async fn try_decode(
    client: &dyn ChainClient,
    tx: &ParsedTransaction,
) -> Result<TokenTransferInfo, TokenDecodeError> {
    let contract = tx.to.ok_or(TokenDecodeError::NoCallData)?;
    if tx.data.is_empty() {
        return Err(TokenDecodeError::NoCallData);
    }
    if !erc20::is_transfer_calldata(&tx.data) {
        return Err(TokenDecodeError::SelectorMismatch);
    }

    let (recipient, amount) =
        erc20::decode_transfer_calldata(&tx.data).map_err(TokenDecodeError::Calldata)?;

    let name_response = client.call(contract, erc20::encode_name()).await?;
    let name = erc20::decode_name(&name_response).map_err(TokenDecodeError::BadResponse)?;

    let decimals_response = client.call(contract, erc20::encode_decimals()).await?;
    let decimals =
        erc20::decode_decimals(&decimals_response).map_err(TokenDecodeError::BadResponse)?;

    Ok(TokenTransferInfo {
        name,
        recipient,
        amount,
        decimals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_transaction;
    use crate::test_support::{signed_legacy_tx, signed_legacy_tx_with_data, signed_transfer_calldata};
    use async_trait::async_trait;
    use ethers::abi::{encode, Token};
    use ethers::types::{Address, TransactionReceipt, H256, U256};
    use std::collections::HashMap;

    /// Read-only mock: answers eth_call from a selector -> response map.
    struct MetadataMock {
        responses: HashMap<[u8; 4], Vec<u8>>,
    }

    impl MetadataMock {
        fn token(name: &str, decimals: u8) -> Self {
            let mut responses = HashMap::new();
            responses.insert(
                crate::erc20::NAME_SELECTOR,
                encode(&[Token::String(name.to_string())]),
            );
            responses.insert(
                crate::erc20::DECIMALS_SELECTOR,
                encode(&[Token::Uint(U256::from(decimals))]),
            );
            Self { responses }
        }

        fn empty() -> Self {
            Self {
                responses: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl ChainClient for MetadataMock {
        async fn transaction_count(&self, _address: Address) -> Result<U256, RpcError> {
            Ok(U256::zero())
        }

        async fn send_raw_transaction(&self, _raw: &[u8]) -> Result<H256, RpcError> {
            panic!("token decode must never submit");
        }

        async fn wait_for_confirmations(
            &self,
            _tx_hash: H256,
            _depth: usize,
        ) -> Result<TransactionReceipt, RpcError> {
            panic!("token decode must never wait for confirmations");
        }

        async fn call(&self, _to: Address, data: Vec<u8>) -> Result<Vec<u8>, RpcError> {
            let selector: [u8; 4] = data[0..4].try_into().unwrap();
            self.responses
                .get(&selector)
                .cloned()
                .ok_or_else(|| RpcError::Request("execution reverted".to_string()))
        }
    }

    fn transfer_tx(amount: U256) -> crate::decoder::ParsedTransaction {
        let recipient = "0x1234567890123456789012345678901234567890"
            .parse::<Address>()
            .unwrap();
        let (raw, _) =
            signed_legacy_tx_with_data(1, 0, 0, signed_transfer_calldata(recipient, amount));
        decode_transaction(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_decodes_transfer_against_compliant_token() {
        let client = MetadataMock::token("X", 18);
        let tx = transfer_tx(U256::from_dec_str("1000000000000000000").unwrap());

        let info = decode_token_transfer(&client, &tx).await.unwrap();
        assert_eq!(info.name, "X");
        assert_eq!(info.decimals, 18);
        assert_eq!(
            info.recipient,
            "0x1234567890123456789012345678901234567890"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(info.amount, U256::from_dec_str("1000000000000000000").unwrap());
    }

    #[tokio::test]
    async fn test_plain_value_transfer_yields_no_attachment() {
        let client = MetadataMock::token("X", 18);
        let (raw, _) = signed_legacy_tx(1, 0, 1);
        let tx = decode_transaction(&raw).unwrap();

        assert!(decode_token_transfer(&client, &tx).await.is_none());
    }

    #[tokio::test]
    async fn test_non_transfer_selector_yields_no_attachment() {
        let client = MetadataMock::token("X", 18);
        // approve(address,uint256) padded to a full word
        let mut data = vec![0x09, 0x5e, 0xa7, 0xb3];
        data.extend_from_slice(&[0u8; 64]);
        let (raw, _) = signed_legacy_tx_with_data(1, 0, 0, data);
        let tx = decode_transaction(&raw).unwrap();

        assert!(decode_token_transfer(&client, &tx).await.is_none());
    }

    #[tokio::test]
    async fn test_failing_metadata_queries_yield_no_attachment() {
        let client = MetadataMock::empty();
        let tx = transfer_tx(U256::from(1u64));

        assert!(decode_token_transfer(&client, &tx).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_metadata_yields_no_attachment() {
        let mut client = MetadataMock::token("X", 18);
        // name() answering a bare word instead of an ABI string
        client
            .responses
            .insert(crate::erc20::NAME_SELECTOR, vec![0u8; 32]);
        let tx = transfer_tx(U256::from(1u64));

        assert!(decode_token_transfer(&client, &tx).await.is_none());
    }
}
