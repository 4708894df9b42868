//! Confidential envelope subsystem.
//!
//! # Data Flow
//! ```text
//! chain id
//!     → sapphire.rs (gateway lookup, runtime call-data key fetch)
//!     → cipher.rs (X25519 key agreement, Deoxys-II seal, CBOR envelope)
//!     → ciphertext placed into the transaction input
//! ```
//!
//! The pipeline only sees the two traits below, so tests can swap in
//! collaborators that count or refuse calls.

use std::future::Future;

use alloy::primitives::Bytes;
use thiserror::Error;

use crate::blockchain::ChainId;

pub mod cipher;
pub mod sapphire;

pub use cipher::DeoxysCipher;
pub use sapphire::SapphireEnvelope;

/// Errors raised while building or using an envelope cipher.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// No gateway is known for this chain.
    #[error("No confidential runtime known for chain {0}")]
    UnknownNetwork(ChainId),

    /// The runtime public key could not be fetched.
    #[error("Failed to fetch call data public key: {0}")]
    KeyFetch(String),

    /// The runtime returned a key of the wrong shape.
    #[error("Invalid call data public key: {0}")]
    InvalidKey(String),

    /// Sealing failed.
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// CBOR encoding of the envelope failed.
    #[error("Envelope encoding error: {0}")]
    Encoding(String),
}

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Call data that has been through an envelope cipher.
///
/// Only the pipeline's encryption step creates these, and the transaction
/// builder only accepts these, so plaintext cannot end up on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(Bytes);

impl Ciphertext {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

/// A cipher context bound to one chain's confidential runtime.
pub trait EnvelopeCipher {
    /// Encrypt call data and encode it as the envelope the runtime expects.
    fn encrypt_encode(&self, plaintext: &[u8]) -> EnvelopeResult<Vec<u8>>;
}

/// Creates cipher contexts keyed by chain identity.
pub trait EnvelopeProvider {
    type Cipher: EnvelopeCipher;

    fn new_cipher(
        &self,
        chain_id: ChainId,
    ) -> impl Future<Output = EnvelopeResult<Self::Cipher>> + Send;
}
