//! CLI wiring: read a signed transaction, run the pipeline, print the
//! result record as JSON.

use dotenv::dotenv;
use std::io::Read;
use std::process;
use std::sync::Arc;

use txcast::config::Config;
use txcast::decoder::decode_transaction;
use txcast::executor::{CompletionHook, ExecuteRequest, TransactionExecutor};
use txcast::networks::Network;
use txcast::result::ExecutionResult;
use txcast::rpc::HttpChainClient;

struct LogHook;

impl CompletionHook for LogHook {
    fn on_result(&self, result: &ExecutionResult) {
        log::info!(
            "[Main] Completed: state={} nonce={} tx_hash={}",
            result.state,
            result.nonce,
            if result.tx_hash.is_empty() {
                "-"
            } else {
                result.tx_hash.as_str()
            }
        );
    }
}

fn usage() -> ! {
    eprintln!("Usage: txcast [--dry-run] <signed-tx-hex | ->");
    eprintln!("  Pass '-' to read the signed transaction from stdin.");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let mut dry_run = false;
    let mut transaction: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            "-" => {
                let mut buf = String::new();
                if std::io::stdin().read_to_string(&mut buf).is_err() {
                    eprintln!("Failed to read transaction from stdin");
                    process::exit(2);
                }
                transaction = Some(buf);
            }
            _ if transaction.is_none() && !arg.starts_with("--") => transaction = Some(arg),
            _ => usage(),
        }
    }
    let transaction = transaction.unwrap_or_else(|| usage());

    let config = Config::from_env();

    // The RPC endpoint depends on the chain id inside the transaction, so
    // resolve the network up front; the executor repeats the (cheap,
    // local) decode as part of its own validation.
    let network = match decode_transaction(&transaction).and_then(|tx| {
        Network::from_chain_id(tx.chain_id)
    }) {
        Ok(network) => network,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let client = match HttpChainClient::for_network(&config, network) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let executor = TransactionExecutor::new(client)
        .with_confirmation_depth(config.confirmation_depth)
        .with_hook(Arc::new(LogHook));

    let request = ExecuteRequest {
        transaction,
        dry_run,
    };

    match executor.execute(&request).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result).unwrap());
        }
        Err(err) => {
            log::error!("[Main] Execution failed: {}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
