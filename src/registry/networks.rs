use crate::config::Config;
use anyhow::bail;
use std::collections::HashMap;
use tracing::warn;

/// Network identifier used when a lookup names no known network.
pub const DEFAULT_NETWORK: &str = "alpha";

/// Connection settings for one network
///
/// Immutable for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub node_url: String,
    pub shared_secret: String,
    pub keyring_backend: String,
    pub home_dir: String,
}

/// Lookup table from network identifier to `NetworkConfig`
///
/// Unknown identifiers resolve to the default network rather than failing.
/// That permissive fallback is a deliberate rule of the contract, so
/// construction refuses a configuration with no default entry.
pub struct NetworkRegistry {
    networks: HashMap<String, NetworkConfig>,
}

impl NetworkRegistry {
    /// Build the registry from loaded configuration
    ///
    /// Combines each `[networks.<id>]` entry with the keyring settings
    /// shared by all networks.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if !config.networks.contains_key(DEFAULT_NETWORK) {
            bail!("configuration defines no '{DEFAULT_NETWORK}' network entry");
        }
        let networks = config
            .networks
            .iter()
            .map(|(id, entry)| {
                let network = NetworkConfig {
                    chain_id: entry.chain_id.clone(),
                    node_url: entry.node_url.clone(),
                    shared_secret: entry.secret.clone(),
                    keyring_backend: config.keyring.backend.clone(),
                    home_dir: config.keyring.home.clone(),
                };
                (id.clone(), network)
            })
            .collect();
        Ok(Self { networks })
    }

    /// Resolve a network identifier to its configuration
    ///
    /// Unknown identifiers fall back to the default entry.
    pub fn resolve(&self, network_id: &str) -> &NetworkConfig {
        if let Some(network) = self.networks.get(network_id) {
            network
        } else {
            warn!(
                "Unknown network '{}', falling back to '{}'",
                network_id, DEFAULT_NETWORK
            );
            &self.networks[DEFAULT_NETWORK]
        }
    }

    pub fn contains(&self, network_id: &str) -> bool {
        self.networks.contains_key(network_id)
    }
}
