//! Execution states, outcomes and the normalized result record
//!
//! Internally the pipeline works with `ExecutionOutcome`, a tagged union
//! over the terminal branches, so per-state field availability is checked
//! by the type system. At the boundary everything is projected onto
//! `ExecutionResult`, a flat record in which every field is always present
//! with a typed default, so the output schema shape never varies by state.

use crate::decoder::ParsedTransaction;
use crate::networks::Network;
use crate::units::{scale_decimals, wei_to_eth};
use ethers::types::{Address, TransactionReceipt, U256};
use serde::Serialize;
use std::fmt;

/// Terminal classification of one execute invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    /// Submitted and confirmed to the target depth
    Mined,
    /// Declared nonce is ahead of the sender's current on-chain nonce
    NonceTooHigh,
    /// Declared nonce was already consumed by an earlier transaction
    NonceSpent,
    /// Dry-run invocation; nothing was queried or submitted
    Test,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::Mined => write!(f, "MINED"),
            ExecutionState::NonceTooHigh => write!(f, "NONCE_TOO_HIGH"),
            ExecutionState::NonceSpent => write!(f, "NONCE_SPENT"),
            ExecutionState::Test => write!(f, "TEST"),
        }
    }
}

/// What actually happened, with the data each branch produced
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    Test,
    NonceTooHigh,
    NonceSpent,
    Mined(Box<TransactionReceipt>),
}

impl ExecutionOutcome {
    pub fn state(&self) -> ExecutionState {
        match self {
            ExecutionOutcome::Test => ExecutionState::Test,
            ExecutionOutcome::NonceTooHigh => ExecutionState::NonceTooHigh,
            ExecutionOutcome::NonceSpent => ExecutionState::NonceSpent,
            ExecutionOutcome::Mined(_) => ExecutionState::Mined,
        }
    }
}

/// Decoded ERC-20 transfer attachment, kept typed until normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransferInfo {
    pub name: String,
    pub recipient: Address,
    pub amount: U256,
    pub decimals: u8,
}

/// The normalized output record.
///
/// All numeric fields are canonical decimal strings with no precision
/// loss. Absent optional data keeps its default, so callers can rely on
/// every key existing on every branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub state: ExecutionState,
    pub network: String,
    pub chain_id: String,
    pub from: String,
    pub to: String,
    pub nonce: String,
    pub sender_nonce: String,
    pub value: String,
    pub human_readable_value: String,
    pub gas_limit: String,
    pub gas_price: String,
    pub data: String,
    pub tx_hash: String,
    pub explorer_url: String,
    pub block_number: String,
    pub gas_used: String,
    pub token_name: String,
    pub token_recipient: String,
    pub token_amount: String,
    pub token_human_readable_amount: String,
}

impl Default for ExecutionResult {
    fn default() -> Self {
        Self {
            state: ExecutionState::Test,
            network: String::new(),
            chain_id: "0".to_string(),
            from: String::new(),
            to: String::new(),
            nonce: "0".to_string(),
            sender_nonce: "0".to_string(),
            value: "0".to_string(),
            human_readable_value: "0".to_string(),
            gas_limit: "0".to_string(),
            gas_price: "0".to_string(),
            data: "0x".to_string(),
            tx_hash: String::new(),
            explorer_url: String::new(),
            block_number: "0".to_string(),
            gas_used: "0".to_string(),
            token_name: String::new(),
            token_recipient: String::new(),
            token_amount: "0".to_string(),
            token_human_readable_amount: "0".to_string(),
        }
    }
}

/// Merge parsed fields, the outcome, the optional token attachment and the
/// sender nonce into the output record. Applied uniformly on every branch.
pub fn normalize(
    parsed: &ParsedTransaction,
    network: Network,
    outcome: &ExecutionOutcome,
    token: Option<TokenTransferInfo>,
    sender_nonce: Option<U256>,
) -> ExecutionResult {
    let mut result = ExecutionResult {
        state: outcome.state(),
        network: network.name().to_string(),
        chain_id: parsed.chain_id.to_string(),
        from: format!("{:?}", parsed.from),
        nonce: parsed.nonce.to_string(),
        value: parsed.value.to_string(),
        human_readable_value: wei_to_eth(parsed.value),
        gas_limit: parsed.gas_limit.to_string(),
        gas_price: parsed.gas_price.to_string(),
        data: format!("0x{}", hex::encode(&parsed.data)),
        ..ExecutionResult::default()
    };

    if let Some(to) = parsed.to {
        result.to = format!("{:?}", to);
    }
    if let Some(nonce) = sender_nonce {
        result.sender_nonce = nonce.to_string();
    }

    if let ExecutionOutcome::Mined(receipt) = outcome {
        result.tx_hash = format!("{:?}", receipt.transaction_hash);
        result.explorer_url = network.explorer_tx_url(receipt.transaction_hash);
        if let Some(block) = receipt.block_number {
            result.block_number = block.to_string();
        }
        if let Some(gas) = receipt.gas_used {
            result.gas_used = gas.to_string();
        }
    }

    if let Some(token) = token {
        result.token_name = token.name;
        result.token_recipient = format!("{:?}", token.recipient);
        result.token_amount = token.amount.to_string();
        result.token_human_readable_amount =
            scale_decimals(token.amount, token.decimals as u32);
    }

    result
}
