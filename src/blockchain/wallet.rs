//! Account key handling and transaction signing.
//!
//! # Security
//! - Key material arrives as a raw hex secret and lives only for one call
//! - Keys are never logged or serialized

use alloy::consensus::SignableTransaction;
use alloy::network::TxSignerSync;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::transaction::{SignedTransaction, UnsignedTransaction};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};

/// Private key plus its derived address.
#[derive(Debug, Clone)]
pub struct AccountKey {
    signer: PrivateKeySigner,
}

impl AccountKey {
    /// Parse a hex-encoded secp256k1 private key.
    ///
    /// A leading `0x` is tolerated even though callers are not expected to
    /// send one.
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self { signer })
    }

    /// Address derived from the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign `tx` under the EIP-155 rules for `chain_id`.
    ///
    /// The chain id is written into the transaction before hashing, so the
    /// signature cannot be replayed on another network.
    pub fn sign(
        &self,
        tx: UnsignedTransaction,
        chain_id: ChainId,
    ) -> BlockchainResult<SignedTransaction> {
        let mut legacy = tx.into_legacy(chain_id);
        let signature = self
            .signer
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;

        Ok(SignedTransaction::new(legacy.into_signed(signature)))
    }
}
