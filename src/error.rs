//! Error taxonomy for the execute-transaction pipeline
//!
//! Every variant is terminal from the caller's point of view: this crate
//! does not retry. Validation errors are produced before any network I/O;
//! network-stage errors keep their underlying cause attached.

use crate::rpc::RpcError;
use ethers::types::{Address, H256, U256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The input does not decode as any recognized transaction encoding.
    #[error("This does not look like a signed Ethereum transaction")]
    NotCompatible,

    /// The input parses as a plain transaction record (it has a `nonce`
    /// field) rather than a signed, serialized transaction.
    #[error("This looks like a raw unsigned transaction record. Sign it and submit the serialized result")]
    RawUnsignedFormat,

    /// Structurally valid encoding, but no sender address is recoverable
    /// from the signature.
    #[error("This transaction is not signed: no sender address could be recovered")]
    Unsigned,

    /// The decoded chain id is not in the supported allow-list.
    #[error("Unsupported network: chain id {0} is not supported")]
    UnsupportedNetwork(u64),

    /// Another invocation already holds the sender+nonce guard, so
    /// broadcasting again would risk a double-submission.
    #[error("A submission for sender {sender:?} with nonce {nonce} is already in flight")]
    SubmissionInFlight { sender: Address, nonce: U256 },

    /// The network rejected the broadcast and the sender's nonce has not
    /// advanced, so no prior attempt landed.
    #[error("Failed to broadcast the transaction")]
    SubmissionFailed(#[source] RpcError),

    /// The transaction was broadcast but the confirmation depth was not
    /// reached before the collaborator's timeout. The hash is included so
    /// the caller can keep watching it.
    #[error("Transaction {tx_hash:?} was broadcast but not confirmed in time")]
    ConfirmationTimeout {
        tx_hash: H256,
        #[source]
        source: RpcError,
    },

    /// A read-side network query (the sender nonce lookup) failed.
    #[error("Network query failed")]
    Rpc(#[from] RpcError),
}
