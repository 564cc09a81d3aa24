//! Shared helpers for unit tests: deterministic wallets and locally
//! signed transactions. Compiled only for tests.

use ethers::abi::{self, Token};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, U256};

use crate::erc20::TRANSFER_SELECTOR;

/// Throwaway key used across tests; never funded anywhere.
pub const TEST_PRIVATE_KEY: &str =
    "4c0883a69102937d6231471b5dbb6204fe512961708279f1d6e2fdcc56d8d9a6";

pub fn test_wallet(chain_id: u64) -> LocalWallet {
    TEST_PRIVATE_KEY
        .parse::<LocalWallet>()
        .unwrap()
        .with_chain_id(chain_id)
}

/// Sign a transaction and return the broadcastable hex string.
pub fn sign_and_hex(wallet: &LocalWallet, tx: &TypedTransaction) -> String {
    let signature = wallet.sign_transaction_sync(tx).unwrap();
    format!("0x{}", hex::encode(tx.rlp_signed(&signature)))
}

/// ABI-encoded transfer(address,uint256) call data.
pub fn signed_transfer_calldata(recipient: Address, amount: U256) -> Vec<u8> {
    let mut data = TRANSFER_SELECTOR.to_vec();
    data.extend_from_slice(&abi::encode(&[
        Token::Address(recipient),
        Token::Uint(amount),
    ]));
    data
}

/// A plain signed value transfer on the given chain, returned as
/// (raw hex, sender address).
pub fn signed_legacy_tx(chain_id: u64, nonce: u64, value: u64) -> (String, Address) {
    signed_legacy_tx_with_data(chain_id, nonce, value, Vec::new())
}

/// A signed legacy transaction carrying arbitrary call data.
pub fn signed_legacy_tx_with_data(
    chain_id: u64,
    nonce: u64,
    value: u64,
    data: Vec<u8>,
) -> (String, Address) {
    let wallet = test_wallet(chain_id);
    let mut request = TransactionRequest::new()
        .nonce(nonce)
        .to("0xeac4cf1e68f0d81b1abbce4152f2ef73b3f8f6ee"
            .parse::<Address>()
            .unwrap())
        .gas(60000u64)
        .gas_price(2_000_000_000u64)
        .value(value)
        .chain_id(chain_id);
    if !data.is_empty() {
        request = request.data(data);
    }
    let tx = TypedTransaction::Legacy(request);
    (sign_and_hex(&wallet, &tx), wallet.address())
}
