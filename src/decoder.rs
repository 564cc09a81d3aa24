//! Transaction decoding and validation
//!
//! Turns the caller's raw hex string into a `ParsedTransaction` or fails
//! with a classified error before any network I/O happens. Accepts legacy,
//! EIP-2930 and EIP-1559 envelopes. A transaction only passes validation
//! when a sender address recovers from its signature.

use crate::error::ExecuteError;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, H256, U256};
use ethers::utils::keccak256;
use ethers::utils::rlp::{Decodable, Rlp};
use serde_json::Value;

/// A decoded, signature-validated transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransaction {
    /// Sender recovered from the signature
    pub from: Address,
    /// Recipient; None for contract creation
    pub to: Option<Address>,
    pub nonce: U256,
    pub gas_limit: U256,
    /// Gas price for legacy/EIP-2930, max fee per gas for EIP-1559
    pub gas_price: U256,
    pub value: U256,
    /// Call data, may be empty
    pub data: Vec<u8>,
    /// Chain id from the envelope or the EIP-155 signature; 0 for
    /// pre-EIP-155 transactions
    pub chain_id: u64,
    /// keccak256 of the raw encoded bytes
    pub hash: H256,
    /// The exact bytes to broadcast
    pub raw_bytes: Vec<u8>,
}

/// Decode and validate a raw signed transaction string.
///
/// Surrounding whitespace and an optional `0x` prefix are stripped first,
/// so trimming never changes the decoded field values.
pub fn decode_transaction(raw: &str) -> Result<ParsedTransaction, ExecuteError> {
    let trimmed = raw.trim();
    let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytes = match hex::decode(hex_str) {
        Ok(b) if !b.is_empty() => b,
        _ => return Err(classify_undecodable(trimmed)),
    };

    let (tx, signature) = match TypedTransaction::decode_signed(&Rlp::new(&bytes)) {
        Ok(decoded) => decoded,
        Err(_) => {
            // An envelope that decodes cleanly without signature fields
            // means the caller serialized before signing.
            if TypedTransaction::decode(&Rlp::new(&bytes)).is_ok() {
                return Err(ExecuteError::Unsigned);
            }
            return Err(classify_undecodable(trimmed));
        }
    };

    // EIP-155 presignature payloads decode as "signed" with r = s = 0.
    if signature.r.is_zero() && signature.s.is_zero() {
        return Err(ExecuteError::Unsigned);
    }

    let from = signature
        .recover(tx.sighash())
        .map_err(|_| ExecuteError::Unsigned)?;

    let gas_price = match &tx {
        TypedTransaction::Legacy(req) => req.gas_price.unwrap_or_default(),
        TypedTransaction::Eip2930(req) => req.tx.gas_price.unwrap_or_default(),
        TypedTransaction::Eip1559(req) => req.max_fee_per_gas.unwrap_or_default(),
    };

    Ok(ParsedTransaction {
        from,
        to: tx.to().and_then(|t| t.as_address()).copied(),
        nonce: tx.nonce().copied().unwrap_or_default(),
        gas_limit: tx.gas().copied().unwrap_or_default(),
        gas_price,
        value: tx.value().copied().unwrap_or_default(),
        data: tx.data().map(|d| d.to_vec()).unwrap_or_default(),
        chain_id: tx.chain_id().map(|id| id.as_u64()).unwrap_or(0),
        hash: H256::from(keccak256(&bytes)),
        raw_bytes: bytes,
    })
}

/// Classify input that did not decode as a serialized transaction.
///
/// Signer tools sometimes hand over the plain JSON transaction record they
/// were supposed to sign; a `nonce` field is the tell.
fn classify_undecodable(input: &str) -> ExecuteError {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Object(fields)) if fields.contains_key("nonce") => {
            ExecuteError::RawUnsignedFormat
        }
        _ => ExecuteError::NotCompatible,
    }
}
