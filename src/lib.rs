//! txcast - validate, classify and broadcast signed Ethereum transactions
//!
//! Takes an already-signed, hex-encoded transaction, validates it (decode,
//! signature recovery, supported network), classifies it against the
//! sender's current on-chain nonce, submits it when the nonce matches and
//! waits for a fixed confirmation depth, best-effort decodes ERC-20
//! transfer call data, and returns one normalized result record.

pub mod config;
pub mod decoder;
pub mod erc20;
pub mod error;
pub mod executor;
pub mod networks;
pub mod result;
pub mod rpc;
pub mod token;
pub mod units;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use decoder::{decode_transaction, ParsedTransaction};
pub use error::ExecuteError;
pub use executor::{CompletionHook, ExecuteRequest, TransactionExecutor, DEFAULT_CONFIRMATION_DEPTH};
pub use networks::Network;
pub use result::{ExecutionResult, ExecutionState, TokenTransferInfo};
pub use rpc::{ChainClient, HttpChainClient, RpcError};
