//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SenderConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an absent file means default behavior
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{EnvelopeConfig, EnvelopeNetwork, ObservabilityConfig, RpcConfig, SenderConfig};
