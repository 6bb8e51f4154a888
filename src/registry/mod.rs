//! Network Registry Module
//!
//! This module implements the static lookup table from a network identifier
//! ("alpha", "beta", "mainnet") to the connection settings the node binary
//! needs. The table is built once from configuration and read-only after
//! startup.

mod networks;

pub use networks::{DEFAULT_NETWORK, NetworkConfig, NetworkRegistry};
