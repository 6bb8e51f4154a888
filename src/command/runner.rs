use crate::CommandOutcome;
use crate::command::{Executor, build_args};
use crate::registry::NetworkRegistry;
use std::sync::Arc;
use tracing::debug;

/// Ties the network registry, flag builder and executor together
///
/// This is the single entry point the HTTP layer and the account state
/// resolver use to run the node binary against a named network.
pub struct CommandRunner {
    registry: Arc<NetworkRegistry>,
    executor: Executor,
}

impl CommandRunner {
    pub fn new(registry: Arc<NetworkRegistry>, executor: Executor) -> Self {
        Self { registry, executor }
    }

    /// Execute a command against the named network
    ///
    /// Resolves the network (falling back to the default for unknown
    /// identifiers), injects the missing flags and runs the binary.
    pub async fn run(
        &self,
        command: &[String],
        network_id: &str,
        needs_confirmation: bool,
    ) -> CommandOutcome {
        let network = self.registry.resolve(network_id);
        let args = build_args(command, network);
        self.executor.execute(&args, network, needs_confirmation).await
    }

    /// Check whether a key exists in the keyring
    pub async fn key_exists(&self, name: &str, network_id: &str) -> bool {
        let command = vec!["keys".to_string(), "show".to_string(), name.to_string()];
        let outcome = self.run(&command, network_id, false).await;
        debug!("Key '{}' exists: {}", name, outcome.succeeded());
        outcome.succeeded()
    }

    /// Import a private key from a hex string
    ///
    /// The binary prompts before overwriting keyring state, so the
    /// confirmation answer is piped in.
    pub async fn import_hex_key(
        &self,
        name: &str,
        hex_key: &str,
        network_id: &str,
    ) -> CommandOutcome {
        let backend = self.registry.resolve(network_id).keyring_backend.clone();
        let command = vec![
            "keys".to_string(),
            "import-hex".to_string(),
            name.to_string(),
            hex_key.to_string(),
            "--key-type".to_string(),
            "secp256k1".to_string(),
            "--keyring-backend".to_string(),
            backend,
        ];
        self.run(&command, network_id, true).await
    }
}
