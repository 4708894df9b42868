//! Confidential transaction sender.
//!
//! Builds a legacy transaction, wraps its call data in the chain's
//! confidential envelope, signs it for the chain id and broadcasts it,
//! reporting a stable integer code for every failure.

pub mod blockchain;
pub mod config;
pub mod envelope;
pub mod ffi;
pub mod observability;
pub mod pipeline;

pub use config::SenderConfig;
pub use pipeline::{CallContext, Outcome, RawTransferRequest, TransactionSender};
