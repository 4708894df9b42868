//! Command line front end for the confidential sender.
//!
//! ```text
//! confidential-sender --from 0x.. --to 0x.. --rpc-url https://testnet.sapphire.oasis.io \
//!     --value 1 --gas-limit 21000 --data 0xdeadbeef
//! ```
//!
//! Prints the transaction hash on success. On failure the result code is
//! printed to stderr and used as the exit status.

use std::path::PathBuf;

use clap::Parser;

use confidential_sender::config::{load_config, SenderConfig};
use confidential_sender::observability::logging;
use confidential_sender::pipeline::{CallContext, RawTransferRequest, TransactionSender};

#[derive(Parser)]
#[command(name = "confidential-sender")]
#[command(about = "Encrypt, sign and broadcast a legacy transaction", long_about = None)]
struct Cli {
    /// Hex private key of the sender.
    #[arg(long, env = "SENDER_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Sender address.
    #[arg(long)]
    from: String,

    /// Recipient address.
    #[arg(long)]
    to: String,

    #[arg(long, default_value = "http://localhost:8545")]
    rpc_url: String,

    /// Value in gwei.
    #[arg(long, default_value_t = 0)]
    value: i64,

    #[arg(long, default_value_t = 21_000)]
    gas_limit: i64,

    /// Call data hex, encrypted before broadcast.
    #[arg(long, default_value = "")]
    data: String,

    /// Gas price in gwei, 0 asks the node.
    #[arg(long, default_value_t = 0)]
    gas_price_gwei: i64,

    /// Nonce, 0 uses the pending nonce.
    #[arg(long, default_value_t = 0)]
    nonce: i64,

    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log payload, nonce and gas price details.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SenderConfig::default(),
    };

    logging::init(&config.observability.log_level)?;

    let ctx = CallContext::new(
        cli.verbose || config.observability.verbose || CallContext::from_env().verbose,
    );
    let request = RawTransferRequest {
        private_key: cli.private_key,
        from: cli.from,
        to: cli.to,
        rpc_url: cli.rpc_url,
        value_gwei: cli.value,
        gas_limit: cli.gas_limit,
        payload_hex: cli.data,
        gas_price_gwei: cli.gas_price_gwei,
        nonce: cli.nonce,
    };

    let sender = TransactionSender::from_config(&config);
    let outcome = sender.send(&request, &ctx).await;

    match outcome.tx_hash() {
        Some(tx_hash) => {
            println!("{}", tx_hash);
            Ok(())
        }
        None => {
            eprintln!("Error: transaction not submitted (code {})", outcome.code());
            std::process::exit(outcome.code());
        }
    }
}
