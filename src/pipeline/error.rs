//! Pipeline errors and their stable result codes.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::envelope::EnvelopeError;

/// Transaction submitted.
pub const SUCCESS: i32 = 0;
/// Cannot connect to the RPC endpoint.
pub const ERR_CONNECT: i32 = -1;
/// Private key is not valid hex key material.
pub const ERR_PRIVATE_KEY: i32 = -2;
/// Pending nonce lookup failed.
pub const ERR_NONCE: i32 = -3;
/// Network id lookup failed.
pub const ERR_CHAIN_ID: i32 = -4;
/// Signing failed.
pub const ERR_SIGN: i32 = -5;
/// Broadcast rejected or failed.
pub const ERR_BROADCAST: i32 = -6;
/// A numeric argument was negative.
pub const ERR_INVALID_ARGUMENT: i32 = -7;
/// Sender or recipient is not a 20-byte hex address.
pub const ERR_INVALID_ADDRESS: i32 = -8;
/// Payload is not valid hex.
pub const ERR_PAYLOAD_HEX: i32 = -42;
/// Gas price suggestion failed.
pub const ERR_GAS_PRICE: i32 = -43;
/// Confidential envelope could not be built or applied.
pub const ERR_ENVELOPE: i32 = 99;

/// Why a submission stopped.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Cannot connect to RPC endpoint: {0}")]
    Connect(#[source] BlockchainError),

    #[error("Invalid private key: {0}")]
    InvalidKey(#[source] BlockchainError),

    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Payload is not valid hex: {0}")]
    PayloadDecode(#[source] hex::FromHexError),

    #[error("Nonce resolution failed: {0}")]
    NonceResolution(#[source] BlockchainError),

    #[error("Chain id lookup failed: {0}")]
    ChainId(#[source] BlockchainError),

    #[error("Gas price suggestion failed: {0}")]
    GasPrice(#[source] BlockchainError),

    #[error("Confidential envelope failed: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Signing failed: {0}")]
    Signing(#[source] BlockchainError),

    #[error("Broadcast failed: {0}")]
    Broadcast(#[source] BlockchainError),
}

impl SendError {
    /// Result code reported across the call boundary.
    pub fn code(&self) -> i32 {
        match self {
            SendError::Connect(_) => ERR_CONNECT,
            SendError::InvalidKey(_) => ERR_PRIVATE_KEY,
            SendError::InvalidArgument { .. } => ERR_INVALID_ARGUMENT,
            SendError::InvalidAddress { .. } => ERR_INVALID_ADDRESS,
            SendError::PayloadDecode(_) => ERR_PAYLOAD_HEX,
            SendError::NonceResolution(_) => ERR_NONCE,
            SendError::ChainId(_) => ERR_CHAIN_ID,
            SendError::GasPrice(_) => ERR_GAS_PRICE,
            SendError::Envelope(_) => ERR_ENVELOPE,
            SendError::Signing(_) => ERR_SIGN,
            SendError::Broadcast(_) => ERR_BROADCAST,
        }
    }
}
