use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::DEFAULT_NETWORK;

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_compute_units() -> u64 {
    10
}

fn default_from_account() -> String {
    "faucet".to_string()
}

/// Raw command submitted by a client for execution against the node binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: Vec<String>,
    #[serde(default = "default_network")]
    pub network: String,
}

/// Result of one invocation of the node binary
///
/// Produced by every executed command. `tx_hash` is populated only when
/// stdout parsed as JSON containing a `txhash` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    #[serde(rename = "txhash")]
    pub tx_hash: Option<String>,
}

impl CommandOutcome {
    /// Outcome for a command that never produced output (missing binary,
    /// spawn fault, timeout)
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: 1,
            tx_hash: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// On-chain replay-protection counters for one address on one network
///
/// `sequence` is monotonically non-decreasing between cache refreshes;
/// `account_number` never changes for a given address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub account_number: u64,
    pub sequence: u64,
}

/// Request to create a new key in the node's keyring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default)]
    pub key_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub address: String,
    pub name: String,
    pub mnemonic: String,
    pub message: String,
}

/// Request to import an existing private key from a hex string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportHexRequest {
    pub name: String,
    pub hex_key: String,
    #[serde(default = "default_network")]
    pub network: String,
}

/// Request to send tokens from a keyring account to an address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundAccountRequest {
    pub address: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default = "default_from_account")]
    pub from_account: String,
}

/// Request to register a service on the network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub service_id: String,
    pub service_name: String,
    #[serde(default = "default_compute_units")]
    pub compute_units: u64,
    pub from_account: String,
    #[serde(default = "default_network")]
    pub network: String,
}

/// Cached replay-protection counters returned by the sequence endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceResponse {
    pub address: String,
    pub network: String,
    pub account_number: u64,
    pub sequence: u64,
}

/// Failures of the account state resolver
///
/// Both variants abort a resolution attempt without mutating the cache.
/// Callers must not build transactions from stale or absent sequence
/// numbers, so these propagate outward instead of being folded into a
/// `CommandOutcome`.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("account query failed: {stderr}")]
    QueryFailed { stderr: String },
    #[error("malformed account state: {0}")]
    ParseFailed(String),
}
