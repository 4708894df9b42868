//! The submission pipeline.
//!
//! Dial, parse the key, normalize inputs, resolve fields, encrypt the
//! payload, build, sign, broadcast. Every stage is one fallible step and
//! the first failure ends the call with that stage's code.

use std::time::Instant;

use crate::blockchain::{AccountKey, Dialer, LedgerSession, RpcDialer, UnsignedTransaction};
use crate::config::SenderConfig;
use crate::envelope::{EnvelopeProvider, SapphireEnvelope};
use crate::observability::metrics;
use crate::pipeline::encryptor::encrypt_payload;
use crate::pipeline::error::SendError;
use crate::pipeline::input::{RawTransferRequest, TransferRequest};
use crate::pipeline::outcome::Outcome;
use crate::pipeline::resolver::resolve_fields;
use crate::pipeline::CallContext;

/// Builds, encrypts, signs and broadcasts one transaction per call.
///
/// Holds no per-transaction state, so one sender may serve concurrent
/// calls; each call dials its own session.
#[derive(Debug, Clone)]
pub struct TransactionSender<D, E> {
    dialer: D,
    envelope: E,
}

impl TransactionSender<RpcDialer, SapphireEnvelope> {
    /// Production collaborators configured from `config`.
    pub fn from_config(config: &SenderConfig) -> Self {
        Self::new(
            RpcDialer::new(config.rpc.clone()),
            SapphireEnvelope::new(&config.envelope),
        )
    }
}

impl<D: Dialer, E: EnvelopeProvider> TransactionSender<D, E> {
    pub fn new(dialer: D, envelope: E) -> Self {
        Self { dialer, envelope }
    }

    /// Run the pipeline and encode the result for the call boundary.
    pub async fn send(&self, request: &RawTransferRequest, ctx: &CallContext) -> Outcome {
        let started = Instant::now();
        let result = self.try_send(request, ctx).await;

        match &result {
            Ok(tx_hash) => tracing::info!(tx_hash = %tx_hash, "Transaction submitted"),
            Err(e) => tracing::warn!(code = e.code(), error = %e, "Transaction not submitted"),
        }

        let outcome = Outcome::from(result);
        metrics::record_outcome(outcome.code(), started.elapsed());
        outcome
    }

    /// Run the pipeline, returning the transaction hash on success.
    pub async fn try_send(
        &self,
        request: &RawTransferRequest,
        ctx: &CallContext,
    ) -> Result<String, SendError> {
        let session = self
            .dialer
            .dial(&request.rpc_url)
            .await
            .map_err(SendError::Connect)?;

        let key =
            AccountKey::from_private_key(&request.private_key).map_err(SendError::InvalidKey)?;

        let transfer = TransferRequest::from_raw(request)?;

        let fields = resolve_fields(&session, &transfer, ctx).await?;

        let input = encrypt_payload(&self.envelope, fields.chain_id, transfer.payload, ctx).await?;

        let tx = UnsignedTransaction::build(
            fields.nonce,
            transfer.to,
            transfer.value,
            input,
            transfer.gas_limit,
            fields.gas_price,
        );

        let signed = key.sign(tx, fields.chain_id).map_err(SendError::Signing)?;

        session
            .send_transaction(&signed)
            .await
            .map_err(SendError::Broadcast)?;

        Ok(signed.display_hash())
    }
}
