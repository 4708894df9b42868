//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the sender.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SenderConfig {
    /// Chain session transport settings.
    pub rpc: RpcConfig,

    /// Confidential envelope settings.
    pub envelope: EnvelopeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain session transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RpcConfig {
    /// Per-request timeout in seconds. No timeout when absent.
    pub timeout_secs: Option<u64>,
}

/// Confidential envelope configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Extra or overriding gateways, keyed by chain id.
    pub networks: Vec<EnvelopeNetwork>,

    /// Timeout in seconds for the call-data public key request.
    pub key_fetch_timeout_secs: Option<u64>,
}

/// Gateway used to fetch the runtime call-data key for one chain.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EnvelopeNetwork {
    pub chain_id: u64,
    pub gateway_url: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit payload, nonce and gas price diagnostics.
    pub verbose: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            verbose: false,
        }
    }
}
