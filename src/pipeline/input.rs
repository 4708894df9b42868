//! Input normalization.
//!
//! Turns the caller's primitive arguments into typed values. Zero nonce and
//! zero gas price are sentinels meaning "ask the node"; they become
//! [`NonceSpec::Pending`] and [`GasPriceSpec::Suggested`] here so nothing
//! downstream ever sees the overloaded zero. A caller therefore cannot
//! request nonce 0 explicitly through the integer interface.

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use crate::pipeline::error::SendError;

/// Wei per gwei.
pub const GWEI: u64 = 1_000_000_000;

/// Arguments exactly as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct RawTransferRequest {
    /// Hex private key, no `0x` expected.
    pub private_key: String,
    pub from: String,
    pub to: String,
    pub rpc_url: String,
    /// Value in gwei.
    pub value_gwei: i64,
    pub gas_limit: i64,
    /// Call data hex, optional `0x` prefix, empty for none.
    pub payload_hex: String,
    /// Fixed gas price in gwei, 0 to use the node's suggestion.
    pub gas_price_gwei: i64,
    /// Explicit nonce, 0 to use the pending nonce.
    pub nonce: i64,
}

/// How the nonce is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceSpec {
    Pending,
    Explicit(u64),
}

/// How the gas price is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPriceSpec {
    Suggested,
    /// Fixed price in wei.
    Fixed(u128),
}

/// Validated request. `payload` is still plaintext here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    /// Value in wei.
    pub value: U256,
    pub gas_limit: u64,
    pub payload: Option<Vec<u8>>,
    pub gas_price: GasPriceSpec,
    pub nonce: NonceSpec,
}

impl TransferRequest {
    /// Normalize everything except the private key and endpoint, which the
    /// pipeline handles first.
    pub fn from_raw(raw: &RawTransferRequest) -> Result<Self, SendError> {
        let from = parse_address("sender", &raw.from)?;
        let to = parse_address("recipient", &raw.to)?;

        let value = gwei_to_wei(non_negative("value", raw.value_gwei)?);
        let gas_limit = non_negative("gas limit", raw.gas_limit)?;

        let gas_price = match non_negative("gas price", raw.gas_price_gwei)? {
            0 => GasPriceSpec::Suggested,
            gwei => GasPriceSpec::Fixed(gwei_to_wei_u128(gwei)),
        };
        let nonce = match non_negative("nonce", raw.nonce)? {
            0 => NonceSpec::Pending,
            n => NonceSpec::Explicit(n),
        };

        let payload = decode_payload(&raw.payload_hex)?;

        Ok(Self {
            from,
            to,
            value,
            gas_limit,
            payload,
            gas_price,
            nonce,
        })
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, SendError> {
    u64::try_from(value).map_err(|_| SendError::InvalidArgument {
        field,
        reason: format!("must not be negative, got {}", value),
    })
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, SendError> {
    Address::from_str(value.trim()).map_err(|_| SendError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Scale a gwei amount to wei.
pub fn gwei_to_wei(gwei: u64) -> U256 {
    U256::from(gwei) * U256::from(GWEI)
}

/// Scale a gwei gas price to wei. Cannot overflow for any `u64` input.
pub fn gwei_to_wei_u128(gwei: u64) -> u128 {
    u128::from(gwei) * u128::from(GWEI)
}

/// Decode call data hex. Empty means no payload; a literal lower-case `0x`
/// prefix is stripped.
pub fn decode_payload(payload_hex: &str) -> Result<Option<Vec<u8>>, SendError> {
    if payload_hex.is_empty() {
        return Ok(None);
    }
    let digits = if payload_hex.len() >= 2 && payload_hex.starts_with("0x") {
        &payload_hex[2..]
    } else {
        payload_hex
    };
    hex::decode(digits).map(Some).map_err(SendError::PayloadDecode)
}
