//! This crate implements a thin HTTP gateway over a blockchain node's
//! command-line binary. Requests arrive as JSON, are turned into binary
//! invocations with the right network flags, and come back as parsed
//! stdout/stderr/exit-code/transaction-hash. Account number and sequence
//! lookups are cached so transaction builders avoid a chain round-trip on
//! every call.

pub mod types; // Shared request/response models, outcomes and typed errors.
pub mod config; // TOML + environment configuration.
pub mod registry; // Network identifier -> connection settings lookup.
pub mod command; // Flag injection and subprocess execution.
pub mod state; // Account number/sequence cache and resolver.
pub mod api; // HTTP routes, auth boundary and server assembly.

// Re-export commonly used types for easier access.
pub use types::*;
pub use config::Config;
pub use registry::{DEFAULT_NETWORK, NetworkConfig, NetworkRegistry};
