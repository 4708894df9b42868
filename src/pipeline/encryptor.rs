//! Payload encryption step.

use crate::blockchain::ChainId;
use crate::envelope::{Ciphertext, EnvelopeCipher, EnvelopeProvider};
use crate::pipeline::error::SendError;
use crate::pipeline::CallContext;

/// Wrap `payload` in the envelope for `chain_id`.
///
/// No payload means no cipher is ever constructed.
pub async fn encrypt_payload<E: EnvelopeProvider>(
    envelope: &E,
    chain_id: ChainId,
    payload: Option<Vec<u8>>,
    ctx: &CallContext,
) -> Result<Option<Ciphertext>, SendError> {
    let Some(plaintext) = payload else {
        if ctx.verbose {
            tracing::info!("Transaction data is empty");
        }
        return Ok(None);
    };

    if ctx.verbose {
        tracing::info!(data = %hex::encode(&plaintext), "Decoded transaction data");
    }

    let cipher = envelope.new_cipher(chain_id).await.map_err(|e| {
        tracing::error!(chain_id = %chain_id, error = %e, "Error creating cipher");
        SendError::Envelope(e)
    })?;
    let encrypted = cipher.encrypt_encode(&plaintext)?;

    if ctx.verbose {
        tracing::info!(data = %hex::encode(&encrypted), "Encrypted transaction data");
    }

    Ok(Some(Ciphertext::new(encrypted)))
}
