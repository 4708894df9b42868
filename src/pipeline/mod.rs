//! Transaction assembly and submission pipeline.
//!
//! # Data Flow
//! ```text
//! RawTransferRequest (caller primitives)
//!     → Dialer::dial                     -1
//!     → AccountKey::from_private_key     -2
//!     → input.rs (addresses, amounts,    -8 / -7
//!                 payload hex)           -42
//!     → resolver.rs (nonce, chain id,    -3 / -4
//!                    gas price)          -43
//!     → encryptor.rs (envelope)          99
//!     → UnsignedTransaction::build
//!     → AccountKey::sign                 -5
//!     → LedgerSession::send_transaction  -6
//!     → Outcome (0 + tx hash, or code)
//! ```

pub mod encryptor;
pub mod error;
pub mod input;
pub mod outcome;
pub mod resolver;
pub mod sender;

pub use error::SendError;
pub use input::{GasPriceSpec, NonceSpec, RawTransferRequest, TransferRequest};
pub use outcome::Outcome;
pub use sender::TransactionSender;

/// Environment variable whose value `DEBUG` turns on verbose diagnostics.
pub const LOG_LEVEL_ENV_VAR: &str = "LOGLEVEL";

/// Per-call settings, read once at call entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    /// Log payload bytes, pending nonce and suggested gas price.
    pub verbose: bool,
}

impl CallContext {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Read `LOGLEVEL` from the environment.
    pub fn from_env() -> Self {
        let verbose = std::env::var(LOG_LEVEL_ENV_VAR)
            .map(|level| level == "DEBUG")
            .unwrap_or(false);
        Self { verbose }
    }
}
