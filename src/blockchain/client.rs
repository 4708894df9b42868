//! Chain session: the connection to one ledger node for one call.
//!
//! # Responsibilities
//! - Dial a JSON-RPC endpoint (http, ws or ipc connection strings)
//! - Query the pending nonce, network id and suggested gas price
//! - Submit signed raw transactions
//! - Apply the configured transport timeout to every round-trip

use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, RpcConfig};

/// Operations the pipeline needs from an open ledger session.
pub trait LedgerSession {
    /// Nonce of the next transaction from `address`, pending pool included.
    fn pending_nonce(&self, address: Address) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Network identity reported by the node.
    fn network_id(&self) -> impl Future<Output = BlockchainResult<ChainId>> + Send;

    /// Gas price suggested by the node, in wei.
    fn suggest_gas_price(&self) -> impl Future<Output = BlockchainResult<u128>> + Send;

    /// Broadcast a signed transaction.
    fn send_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> impl Future<Output = BlockchainResult<()>> + Send;
}

/// Opens ledger sessions.
pub trait Dialer {
    type Session: LedgerSession;

    fn dial(&self, url: &str) -> impl Future<Output = BlockchainResult<Self::Session>> + Send;
}

/// Dials alloy JSON-RPC providers.
#[derive(Debug, Clone, Default)]
pub struct RpcDialer {
    config: RpcConfig,
}

impl RpcDialer {
    pub fn new(config: RpcConfig) -> Self {
        Self { config }
    }
}

impl Dialer for RpcDialer {
    type Session = RpcSession;

    async fn dial(&self, url: &str) -> BlockchainResult<RpcSession> {
        RpcSession::connect(url, &self.config).await
    }
}

/// Ledger session backed by an alloy provider.
#[derive(Clone)]
pub struct RpcSession {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    /// Request timeout duration, if the transport enforces one.
    timeout_duration: Option<Duration>,
}

impl RpcSession {
    /// Connect to `url`.
    ///
    /// For http endpoints no round-trip happens here; the first request
    /// surfaces reachability problems.
    pub async fn connect(url: &str, config: &RpcConfig) -> BlockchainResult<Self> {
        let provider = ProviderBuilder::new()
            .connect(url)
            .await
            .map_err(|e| BlockchainError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(rpc_url = %url, "Chain session opened");

        Ok(Self {
            provider: Arc::new(provider) as Arc<dyn Provider + Send + Sync>,
            rpc_url: url.to_string(),
            timeout_duration: config.timeout_secs.map(Duration::from_secs),
        })
    }

    async fn call<T, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        let result = match self.timeout_duration {
            Some(duration) => match timeout(duration, fut.into_future()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(method, rpc_url = %self.rpc_url, "RPC timeout");
                    return Err(BlockchainError::Timeout(duration.as_secs()));
                }
            },
            None => fut.await,
        };

        result.map_err(|e| {
            tracing::warn!(method, rpc_url = %self.rpc_url, error = %e, "RPC error");
            BlockchainError::Rpc(format!("{method}: {e}"))
        })
    }
}

impl LedgerSession for RpcSession {
    async fn pending_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.call(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    async fn network_id(&self) -> BlockchainResult<ChainId> {
        self.call("net_version", self.provider.get_net_version())
            .await
            .map(ChainId)
    }

    async fn suggest_gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", self.provider.get_gas_price()).await
    }

    async fn send_transaction(&self, tx: &SignedTransaction) -> BlockchainResult<()> {
        let raw = tx.encoded();
        self.call(
            "eth_sendRawTransaction",
            self.provider.send_raw_transaction(&raw),
        )
        .await
        .map(|_| ())
    }
}

impl std::fmt::Debug for RpcSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcSession")
            .field("rpc_url", &self.rpc_url)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
