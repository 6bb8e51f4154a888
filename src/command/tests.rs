//! Tests for command execution against a stand-in node binary
//!
//! These use small shell scripts as the "binary" so the full spawn,
//! confirmation, environment and timeout paths are exercised for real.

#[cfg(test)]
mod tests {
    use crate::command::{CommandRunner, Executor};
    use crate::config::Config;
    use crate::registry::{NetworkConfig, NetworkRegistry};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("pocketd");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn network() -> NetworkConfig {
        NetworkConfig {
            chain_id: "pocket-alpha".to_string(),
            node_url: "https://rpc.example.com".to_string(),
            shared_secret: String::new(),
            keyring_backend: "test".to_string(),
            home_dir: ".pocket".to_string(),
        }
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn missing_binary_fails_without_spawning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");
        let executor = Executor::new(&path, Duration::from_secs(5));

        let outcome = executor.execute(&args(&["query", "account"]), &network(), false).await;

        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.stdout.is_empty());
        assert!(outcome.stderr.contains(path.to_str().unwrap()));
        assert!(outcome.tx_hash.is_none());
    }

    #[tokio::test]
    async fn json_stdout_is_pretty_printed_and_hash_extracted() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, r#"echo '{"txhash":"DEADBEEF","code":0}'"#);
        let executor = Executor::new(&script, Duration::from_secs(5));

        let outcome = executor.execute(&args(&["tx", "bank", "send"]), &network(), false).await;

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.tx_hash.as_deref(), Some("DEADBEEF"));
        assert!(outcome.stdout.contains("  \"txhash\": \"DEADBEEF\""));
    }

    #[tokio::test]
    async fn plain_text_stdout_passes_through() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo 'name: alice'");
        let executor = Executor::new(&script, Duration::from_secs(5));

        let outcome = executor.execute(&args(&["keys", "show", "alice"]), &network(), false).await;

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.stdout, "name: alice\n");
        assert!(outcome.tx_hash.is_none());
    }

    #[tokio::test]
    async fn confirmation_answer_reaches_stdin() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "read answer\necho \"answer:$answer\"");
        let executor = Executor::new(&script, Duration::from_secs(5));

        let outcome = executor.execute(&args(&["keys", "export", "a"]), &network(), true).await;

        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.stdout.contains("answer:yes"));
    }

    #[tokio::test]
    async fn shared_secret_is_overlaid_only_when_nonempty() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo \"secret:${NETWORK_SECRET-unset}\"");
        let executor = Executor::new(&script, Duration::from_secs(5));

        let mut with_secret = network();
        with_secret.shared_secret = "hunter2".to_string();
        let outcome = executor.execute(&args(&["query"]), &with_secret, false).await;
        assert!(outcome.stdout.contains("secret:hunter2"));

        let outcome = executor.execute(&args(&["query"]), &network(), false).await;
        assert!(outcome.stdout.contains("secret:unset"));
    }

    #[tokio::test]
    async fn hung_binary_is_killed_at_the_timeout() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "sleep 5");
        let executor = Executor::new(&script, Duration::from_millis(200));

        let outcome = executor.execute(&args(&["query", "block"]), &network(), false).await;

        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.stderr.contains("timed out"));
    }

    #[tokio::test]
    async fn nonzero_exit_propagates_with_stderr() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo 'key not found' >&2\nexit 3");
        let executor = Executor::new(&script, Duration::from_secs(5));

        let outcome = executor.execute(&args(&["keys", "show", "ghost"]), &network(), false).await;

        assert_eq!(outcome.exit_code, 3);
        assert!(outcome.stderr.contains("key not found"));
    }

    fn runner_for(script: &PathBuf) -> CommandRunner {
        let registry = NetworkRegistry::from_config(&Config::default()).unwrap();
        let executor = Executor::new(script, Duration::from_secs(5));
        CommandRunner::new(Arc::new(registry), executor)
    }

    #[tokio::test]
    async fn runner_injects_flags_for_the_resolved_network() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo \"$@\"");
        let runner = runner_for(&script);

        let outcome = runner.run(&args(&["query", "pools"]), "beta", false).await;

        assert!(outcome.stdout.contains("--node https://shannon-testnet-grove-rpc.beta.poktroll.com"));
        assert!(outcome.stdout.contains("--output json"));
    }

    #[tokio::test]
    async fn runner_falls_back_to_default_network() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo \"$@\"");
        let runner = runner_for(&script);

        let outcome = runner.run(&args(&["query", "pools"]), "no-such-network", false).await;

        assert!(outcome.stdout.contains("alpha.poktroll.com"));
    }

    #[tokio::test]
    async fn key_exists_reflects_the_exit_code() {
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo '{}'");
        let runner = runner_for(&script);
        assert!(runner.key_exists("alice", "alpha").await);

        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "exit 1");
        let runner = runner_for(&script);
        assert!(!runner.key_exists("alice", "alpha").await);
    }
}
