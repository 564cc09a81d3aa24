//! Validate -> classify -> broadcast -> normalize pipeline
//!
//! One invocation handles one already-signed transaction: decode it,
//! resolve its network, classify its nonce against the sender's on-chain
//! count, submit it only when the nonce matches, wait for the target
//! confirmation depth, and merge everything into one normalized record.
//!
//! Broadcasting is guarded by a sender+nonce in-flight set so overlapping
//! invocations (or caller retries) cannot double-submit the same slot.

use crate::decoder::{decode_transaction, ParsedTransaction};
use crate::error::ExecuteError;
use crate::networks::Network;
use crate::result::{normalize, ExecutionOutcome, ExecutionResult};
use crate::rpc::ChainClient;
use crate::token::decode_token_transfer;
use dashmap::DashSet;
use ethers::types::{Address, U256};
use std::sync::Arc;

/// Confirming blocks required before a broadcast counts as mined
pub const DEFAULT_CONFIRMATION_DEPTH: usize = 3;

/// One execute invocation's input
#[derive(Debug, Clone)]
pub struct ExecuteRequest {
    /// Hex-encoded signed transaction, surrounding whitespace tolerated
    pub transaction: String,
    /// Preview mode: classify and decode, never touch the chain state
    pub dry_run: bool,
}

/// Observer invoked with every completed result record.
///
/// Replaces a hard-wired reporting endpoint: callers that want telemetry
/// subscribe here instead.
pub trait CompletionHook: Send + Sync {
    fn on_result(&self, result: &ExecutionResult);
}

pub struct TransactionExecutor {
    client: Arc<dyn ChainClient>,
    confirmation_depth: usize,
    in_flight: DashSet<(Address, U256)>,
    hook: Option<Arc<dyn CompletionHook>>,
}

impl TransactionExecutor {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self {
            client,
            confirmation_depth: DEFAULT_CONFIRMATION_DEPTH,
            in_flight: DashSet::new(),
            hook: None,
        }
    }

    pub fn with_confirmation_depth(mut self, depth: usize) -> Self {
        self.confirmation_depth = depth;
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn CompletionHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Run the full pipeline for one signed transaction.
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecutionResult, ExecuteError> {
        let parsed = decode_transaction(&request.transaction)?;
        let network = Network::from_chain_id(parsed.chain_id)?;

        log::info!(
            "[Executor] {:?} nonce {} on {} (dry_run={})",
            parsed.hash,
            parsed.nonce,
            network,
            request.dry_run
        );

        let (outcome, sender_nonce) = if request.dry_run {
            // Dry-run short-circuits before any chain comparison.
            (ExecutionOutcome::Test, None)
        } else {
            let sender_nonce = self.client.transaction_count(parsed.from).await?;
            let outcome = if parsed.nonce > sender_nonce {
                log::info!(
                    "[Executor] Nonce {} ahead of sender nonce {}, not submitting",
                    parsed.nonce,
                    sender_nonce
                );
                ExecutionOutcome::NonceTooHigh
            } else if parsed.nonce < sender_nonce {
                log::info!(
                    "[Executor] Nonce {} already spent (sender nonce {})",
                    parsed.nonce,
                    sender_nonce
                );
                ExecutionOutcome::NonceSpent
            } else {
                self.broadcast_and_wait(&parsed).await?
            };
            (outcome, Some(sender_nonce))
        };

        let token = decode_token_transfer(self.client.as_ref(), &parsed).await;
        let result = normalize(&parsed, network, &outcome, token, sender_nonce);

        if let Some(hook) = &self.hook {
            hook.on_result(&result);
        }
        Ok(result)
    }

    /// Submit the raw bytes at most once and block until the confirmation
    /// depth is reached.
    async fn broadcast_and_wait(
        &self,
        parsed: &ParsedTransaction,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let key = (parsed.from, parsed.nonce);
        let _guard =
            InFlightGuard::acquire(&self.in_flight, key).ok_or(ExecuteError::SubmissionInFlight {
                sender: parsed.from,
                nonce: parsed.nonce,
            })?;

        let tx_hash = match self.client.send_raw_transaction(&parsed.raw_bytes).await {
            Ok(hash) => hash,
            Err(send_err) => {
                // A rejected broadcast is ambiguous when a prior attempt may
                // have landed: re-check the nonce before failing.
                match self.client.transaction_count(parsed.from).await {
                    Ok(current) if current > parsed.nonce => {
                        log::warn!(
                            "[Executor] Broadcast rejected but sender nonce advanced to {}; treating nonce {} as spent",
                            current,
                            parsed.nonce
                        );
                        return Ok(ExecutionOutcome::NonceSpent);
                    }
                    Ok(_) => {}
                    Err(recheck_err) => {
                        log::warn!("[Executor] Nonce re-check failed: {}", recheck_err);
                    }
                }
                return Err(ExecuteError::SubmissionFailed(send_err));
            }
        };

        log::info!(
            "[Executor] Broadcast {:?}, waiting for {} confirmations",
            tx_hash,
            self.confirmation_depth
        );

        let receipt = self
            .client
            .wait_for_confirmations(tx_hash, self.confirmation_depth)
            .await
            .map_err(|source| ExecuteError::ConfirmationTimeout { tx_hash, source })?;

        log::info!(
            "[Executor] {:?} mined in block {:?}",
            tx_hash,
            receipt.block_number
        );
        Ok(ExecutionOutcome::Mined(Box::new(receipt)))
    }
}

/// RAII membership in the in-flight set; the slot frees on drop, whether
/// the submission confirmed or failed.
struct InFlightGuard<'a> {
    set: &'a DashSet<(Address, U256)>,
    key: (Address, U256),
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a DashSet<(Address, U256)>, key: (Address, U256)) -> Option<Self> {
        if set.insert(key) {
            Some(Self { set, key })
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.key);
    }
}
