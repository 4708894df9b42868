//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! raw private key hex
//!     → wallet.rs (key parsing, EIP-155 signing)
//! RPC endpoint
//!     → client.rs (chain session: nonce, network id, gas price, submit)
//! resolved fields
//!     → transaction.rs (legacy tx assembly, signed form, hash, encoding)
//! ```
//!
//! # Security Constraints
//! - Private keys exist only for the duration of one call
//! - Never log private keys or sensitive data

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{Dialer, LedgerSession, RpcDialer, RpcSession};
pub use transaction::{SignedTransaction, UnsignedTransaction};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::AccountKey;
