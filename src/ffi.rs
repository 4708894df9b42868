//! C ABI boundary.
//!
//! Marshals C strings and ints into a [`RawTransferRequest`], runs one
//! pipeline on a runtime owned by this call, and hands back a code plus an
//! optional heap string that the caller must release with
//! [`free_tx_hash`].

use std::ffi::{c_char, c_int, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::config::{load_config, ConfigError, SenderConfig};
use crate::observability::logging;
use crate::pipeline::error::ERR_CONNECT;
use crate::pipeline::{CallContext, Outcome, RawTransferRequest, TransactionSender};

/// Environment variable pointing at an optional TOML config file.
pub const CONFIG_ENV_VAR: &str = "CONFIDENTIAL_SENDER_CONFIG";

/// Result returned across the C boundary. `tx_hash` is null unless
/// `code == 0`.
#[repr(C)]
#[derive(Debug)]
pub struct SendResult {
    pub code: c_int,
    pub tx_hash: *mut c_char,
}

impl From<Outcome> for SendResult {
    fn from(outcome: Outcome) -> Self {
        let code = outcome.code();
        let tx_hash = outcome
            .tx_hash()
            .and_then(|hash| CString::new(hash).ok())
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut());
        Self { code, tx_hash }
    }
}

/// Copy a C string; null reads as empty.
///
/// # Safety
/// `ptr` must be null or point at a NUL-terminated string.
unsafe fn read_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

fn load_boundary_config() -> Result<SenderConfig, ConfigError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => load_config(Path::new(&path)),
        Err(_) => Ok(SenderConfig::default()),
    }
}

/// Config for this call, with logging already installed. An unusable
/// config file is reported once logging is up, then replaced by defaults.
fn boundary_config() -> SenderConfig {
    match load_boundary_config() {
        Ok(config) => {
            logging::try_init(&config.observability.log_level);
            config
        }
        Err(e) => {
            let config = SenderConfig::default();
            logging::try_init(&config.observability.log_level);
            tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
            config
        }
    }
}

/// Build, encrypt, sign and broadcast one legacy transaction.
///
/// Returns -1 both when the endpoint cannot be dialed and when the call's
/// own async runtime cannot be started; callers cannot tell the two apart
/// from the code alone, the log says which.
///
/// # Safety
/// Every pointer argument must be null or a valid NUL-terminated string
/// that stays alive for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn send_eth_transaction(
    key_hex: *const c_char,
    from_addr: *const c_char,
    to_addr: *const c_char,
    rpc_url: *const c_char,
    value_gwei: c_int,
    gas_limit: c_int,
    data_hex: *const c_char,
    gas_price_gwei: c_int,
    nonce: c_int,
) -> SendResult {
    let config = boundary_config();
    let ctx = CallContext::new(CallContext::from_env().verbose || config.observability.verbose);

    let request = RawTransferRequest {
        private_key: read_str(key_hex),
        from: read_str(from_addr),
        to: read_str(to_addr),
        rpc_url: read_str(rpc_url),
        value_gwei: i64::from(value_gwei),
        gas_limit: i64::from(gas_limit),
        payload_hex: read_str(data_hex),
        gas_price_gwei: i64::from(gas_price_gwei),
        nonce: i64::from(nonce),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start runtime");
            return SendResult {
                code: ERR_CONNECT,
                tx_hash: ptr::null_mut(),
            };
        }
    };

    let sender = TransactionSender::from_config(&config);
    SendResult::from(runtime.block_on(sender.send(&request, &ctx)))
}

/// Release a hash string returned by [`send_eth_transaction`].
///
/// # Safety
/// `tx_hash` must be null or a pointer previously returned in
/// [`SendResult::tx_hash`], and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn free_tx_hash(tx_hash: *mut c_char) {
    if !tx_hash.is_null() {
        drop(CString::from_raw(tx_hash));
    }
}
