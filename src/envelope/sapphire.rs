//! Sapphire runtime envelope provider.
//!
//! Maps a chain id to the gateway that serves the runtime's call-data
//! public key, fetches the key and hands back a [`DeoxysCipher`].

use std::collections::HashMap;
use std::time::Duration;

use alloy::primitives::Bytes;
use alloy::providers::{Provider, ProviderBuilder};
use serde::Deserialize;
use tokio::time::timeout;

use crate::blockchain::ChainId;
use crate::config::EnvelopeConfig;
use crate::envelope::{DeoxysCipher, EnvelopeError, EnvelopeProvider, EnvelopeResult};

pub const SAPPHIRE_MAINNET: u64 = 0x5afe;
pub const SAPPHIRE_TESTNET: u64 = 0x5aff;
pub const SAPPHIRE_LOCALNET: u64 = 0x5afd;

const DEFAULT_GATEWAYS: &[(u64, &str)] = &[
    (SAPPHIRE_MAINNET, "https://sapphire.oasis.io"),
    (SAPPHIRE_TESTNET, "https://testnet.sapphire.oasis.io"),
    (SAPPHIRE_LOCALNET, "http://localhost:8545"),
];

const CALL_DATA_PUBLIC_KEY_METHOD: &str = "oasis_callDataPublicKey";

#[derive(Debug, Deserialize)]
struct CallDataPublicKey {
    key: Bytes,
    #[serde(default)]
    epoch: Option<u64>,
}

/// Envelope provider for Sapphire networks.
#[derive(Debug, Clone)]
pub struct SapphireEnvelope {
    gateways: HashMap<u64, String>,
    key_fetch_timeout: Option<Duration>,
}

impl Default for SapphireEnvelope {
    fn default() -> Self {
        Self::new(&EnvelopeConfig::default())
    }
}

impl SapphireEnvelope {
    /// Built-in networks, overridden or extended by `config.networks`.
    pub fn new(config: &EnvelopeConfig) -> Self {
        let mut gateways: HashMap<u64, String> = DEFAULT_GATEWAYS
            .iter()
            .map(|(id, url)| (*id, url.to_string()))
            .collect();
        for network in &config.networks {
            gateways.insert(network.chain_id, network.gateway_url.clone());
        }

        Self {
            gateways,
            key_fetch_timeout: config.key_fetch_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Gateway serving the runtime key for `chain_id`.
    pub fn gateway(&self, chain_id: ChainId) -> Option<&str> {
        self.gateways.get(&chain_id.0).map(String::as_str)
    }

    async fn fetch_public_key(&self, gateway_url: &str) -> EnvelopeResult<[u8; 32]> {
        let provider = ProviderBuilder::new()
            .connect(gateway_url)
            .await
            .map_err(|e| EnvelopeError::KeyFetch(format!("{}: {}", gateway_url, e)))?;

        let request =
            provider.raw_request::<_, CallDataPublicKey>(CALL_DATA_PUBLIC_KEY_METHOD.into(), ());
        let response = match self.key_fetch_timeout {
            Some(duration) => timeout(duration, request).await.map_err(|_| {
                EnvelopeError::KeyFetch(format!("timed out after {}s", duration.as_secs()))
            })?,
            None => request.await,
        }
        .map_err(|e| EnvelopeError::KeyFetch(e.to_string()))?;

        let key = <[u8; 32]>::try_from(&response.key[..]).map_err(|_| {
            EnvelopeError::InvalidKey(format!("expected 32 bytes, got {}", response.key.len()))
        })?;

        tracing::debug!(
            gateway = %gateway_url,
            epoch = ?response.epoch,
            "Fetched call data public key"
        );
        Ok(key)
    }
}

impl EnvelopeProvider for SapphireEnvelope {
    type Cipher = DeoxysCipher;

    async fn new_cipher(&self, chain_id: ChainId) -> EnvelopeResult<DeoxysCipher> {
        let gateway = self
            .gateway(chain_id)
            .ok_or(EnvelopeError::UnknownNetwork(chain_id))?;
        let runtime_key = self.fetch_public_key(gateway).await?;
        DeoxysCipher::new(runtime_key)
    }
}
