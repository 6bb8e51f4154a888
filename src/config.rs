//! Configuration Module
//!
//! This module defines all configuration structures for the gateway.
//! Configuration is loaded from a TOML file and parsed using serde, then
//! overlaid with environment variables so deployments can inject secrets
//! and paths without editing the file.
//!
//! # Example TOML
//! ```toml
//! [api]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [binary]
//! path = "/usr/local/bin/pocketd"
//! timeout_secs = 60
//!
//! [networks.alpha]
//! chain_id = "pocket-alpha"
//! node_url = "https://shannon-testnet-grove-rpc.alpha.poktroll.com"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
///
/// Contains all configuration sections for the gateway. Every section has
/// defaults matching the development deployment, so a missing file or a
/// partial file still yields a runnable configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub binary: BinaryConfig,
    #[serde(default)]
    pub keyring: KeyringConfig,
    #[serde(default)]
    pub funding: FundingConfig,
    #[serde(default = "default_networks")]
    pub networks: HashMap<String, NetworkEntry>,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on
/// - `allowed_origins`: frontend origins granted CORS access
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
}

/// Node binary configuration
///
/// # Fields
/// - `path`: filesystem location of the node CLI binary
/// - `timeout_secs`: upper bound on one subprocess invocation; a hung
///   binary is killed when the bound expires
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryConfig {
    pub path: String,
    pub timeout_secs: u64,
}

/// Keyring configuration shared by all networks
///
/// # Fields
/// - `backend`: the binary's key-storage mode (e.g. "test" vs. "os")
/// - `home`: home directory passed to key and transaction commands
#[derive(Debug, Clone, Deserialize)]
pub struct KeyringConfig {
    pub backend: String,
    pub home: String,
}

/// Faucet funding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FundingConfig {
    pub default_amount: String,
}

/// One entry of the `[networks]` table
///
/// The shared secret is normally injected through the environment
/// (`ALPHA_SECRET`, `BETA_SECRET`, ...) rather than stored in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkEntry {
    pub chain_id: String,
    pub node_url: String,
    #[serde(default)]
    pub secret: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: default_origins(),
        }
    }
}

impl Default for BinaryConfig {
    fn default() -> Self {
        Self {
            path: "/usr/local/bin/pocketd".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            backend: "test".to_string(),
            home: ".pocket".to_string(),
        }
    }
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            default_amount: "1000000upokt".to_string(),
        }
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_networks() -> HashMap<String, NetworkEntry> {
    let mut networks = HashMap::new();
    networks.insert(
        "alpha".to_string(),
        NetworkEntry {
            chain_id: "pocket-alpha".to_string(),
            node_url: "https://shannon-testnet-grove-rpc.alpha.poktroll.com".to_string(),
            secret: "alpha_default_secret".to_string(),
        },
    );
    networks.insert(
        "beta".to_string(),
        NetworkEntry {
            chain_id: "pocket-beta".to_string(),
            node_url: "https://shannon-testnet-grove-rpc.beta.poktroll.com".to_string(),
            secret: "beta_default_secret".to_string(),
        },
    );
    networks.insert(
        "mainnet".to_string(),
        NetworkEntry {
            chain_id: "pocket".to_string(),
            node_url: "https://shannon-grove-rpc.mainnet.poktroll.com".to_string(),
            secret: "mainnet_default_secret".to_string(),
        },
    );
    networks
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            binary: BinaryConfig::default(),
            keyring: KeyringConfig::default(),
            funding: FundingConfig::default(),
            networks: default_networks(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    ///
    /// A present-but-invalid file is still an error; only a missing file
    /// falls back.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay environment variables onto the loaded configuration
    ///
    /// Recognized variables:
    /// - `POCKET_BIN_PATH`: node binary location
    /// - `POCKET_HOME`: keyring home directory
    /// - `POCKET_TEST_KEYRING_BACKEND`: keyring backend
    /// - `DEFAULT_FUNDING_AMOUNT`: faucet amount
    /// - per network `<ID>_SECRET`, `POCKET_CHAIN_<ID>`, and
    ///   `POCKET_<ID>_NODE_URL` (network id uppercased)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("POCKET_BIN_PATH") {
            self.binary.path = path;
        }
        if let Ok(home) = env::var("POCKET_HOME") {
            self.keyring.home = home;
        }
        if let Ok(backend) = env::var("POCKET_TEST_KEYRING_BACKEND") {
            self.keyring.backend = backend;
        }
        if let Ok(amount) = env::var("DEFAULT_FUNDING_AMOUNT") {
            self.funding.default_amount = amount;
        }
        for (id, entry) in self.networks.iter_mut() {
            let id = id.to_uppercase();
            if let Ok(secret) = env::var(format!("{id}_SECRET")) {
                entry.secret = secret;
            }
            if let Ok(chain_id) = env::var(format!("POCKET_CHAIN_{id}")) {
                entry.chain_id = chain_id;
            }
            if let Ok(node_url) = env::var(format!("POCKET_{id}_NODE_URL")) {
                entry.node_url = node_url;
            }
        }
    }
}
