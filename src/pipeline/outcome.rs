//! Result encoding for the call boundary.

use crate::pipeline::error::{SendError, SUCCESS};

/// Exactly one of these is produced per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Submitted; carries the lower-case `0x`-prefixed transaction hash.
    Success { tx_hash: String },
    /// Stopped at some stage; no hash is exposed.
    Failure { code: i32 },
}

impl Outcome {
    pub fn code(&self) -> i32 {
        match self {
            Outcome::Success { .. } => SUCCESS,
            Outcome::Failure { code } => *code,
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Outcome::Success { tx_hash } => Some(tx_hash),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl From<Result<String, SendError>> for Outcome {
    fn from(result: Result<String, SendError>) -> Self {
        match result {
            Ok(tx_hash) => Outcome::Success { tx_hash },
            Err(e) => Outcome::Failure { code: e.code() },
        }
    }
}
