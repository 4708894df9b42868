//! Field resolution against the chain session.

use crate::blockchain::{ChainId, LedgerSession};
use crate::pipeline::error::SendError;
use crate::pipeline::input::{GasPriceSpec, NonceSpec, TransferRequest};
use crate::pipeline::CallContext;

/// Fields the node had to supply, or the caller's explicit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFields {
    pub nonce: u64,
    pub chain_id: ChainId,
    /// Gas price in wei.
    pub gas_price: u128,
}

/// Resolve nonce, chain id and gas price, stopping at the first failure.
///
/// Each session method is called at most once.
pub async fn resolve_fields<S: LedgerSession>(
    session: &S,
    request: &TransferRequest,
    ctx: &CallContext,
) -> Result<ResolvedFields, SendError> {
    let nonce = match request.nonce {
        NonceSpec::Explicit(nonce) => nonce,
        NonceSpec::Pending => {
            let nonce = session
                .pending_nonce(request.from)
                .await
                .map_err(SendError::NonceResolution)?;
            if ctx.verbose {
                tracing::info!(address = %request.from, nonce, "Pending nonce");
            }
            nonce
        }
    };

    let chain_id = session.network_id().await.map_err(SendError::ChainId)?;

    let gas_price = match request.gas_price {
        GasPriceSpec::Fixed(wei) => wei,
        GasPriceSpec::Suggested => {
            let wei = session
                .suggest_gas_price()
                .await
                .map_err(SendError::GasPrice)?;
            if ctx.verbose {
                tracing::info!(gas_price_wei = wei, "Suggested gas price");
            }
            wei
        }
    };

    Ok(ResolvedFields {
        nonce,
        chain_id,
        gas_price,
    })
}
