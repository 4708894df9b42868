//! Legacy transaction assembly and the signed form handed to the broadcaster.
//!
//! # Responsibilities
//! - Build the unsigned legacy (single gas price) transaction
//! - Carry the signed transaction, its hash and its wire encoding

use alloy::consensus::{Signed, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{Address, TxHash, TxKind, U256};

use crate::blockchain::types::ChainId;
use crate::envelope::Ciphertext;

/// Unsigned legacy transaction.
///
/// The input is envelope ciphertext or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    nonce: u64,
    to: Address,
    value: U256,
    input: Option<Ciphertext>,
    gas_limit: u64,
    gas_price: u128,
}

impl UnsignedTransaction {
    /// Assemble a transaction from already resolved fields. `value` and
    /// `gas_price` are in wei.
    pub fn build(
        nonce: u64,
        to: Address,
        value: U256,
        input: Option<Ciphertext>,
        gas_limit: u64,
        gas_price: u128,
    ) -> Self {
        Self {
            nonce,
            to,
            value,
            input,
            gas_limit,
            gas_price,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn to(&self) -> Address {
        self.to
    }

    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn input(&self) -> Option<&Ciphertext> {
        self.input.as_ref()
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    pub(crate) fn into_legacy(self, chain_id: ChainId) -> TxLegacy {
        TxLegacy {
            chain_id: Some(chain_id.0),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.input.map(Ciphertext::into_bytes).unwrap_or_default(),
        }
    }
}

/// Signed legacy transaction.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    inner: Signed<TxLegacy>,
}

impl SignedTransaction {
    pub(crate) fn new(inner: Signed<TxLegacy>) -> Self {
        Self { inner }
    }

    /// The signed transaction body.
    pub fn tx(&self) -> &TxLegacy {
        self.inner.tx()
    }

    /// Transaction hash, derived at signing time.
    pub fn hash(&self) -> TxHash {
        *self.inner.hash()
    }

    /// Lower-case, `0x`-prefixed hash as returned to callers.
    pub fn display_hash(&self) -> String {
        format!("{:#x}", self.hash())
    }

    /// RLP encoding as accepted by `eth_sendRawTransaction`.
    pub fn encoded(&self) -> Vec<u8> {
        TxEnvelope::Legacy(self.inner.clone()).encoded_2718()
    }

    /// Address that produced the signature.
    pub fn recover_signer(&self) -> Result<Address, alloy::primitives::SignatureError> {
        self.inner.recover_signer()
    }
}
