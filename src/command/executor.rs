use crate::CommandOutcome;
use crate::registry::NetworkConfig;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

/// Process executor for the node binary
///
/// Spawns the binary with caller-built arguments, captures stdout, stderr
/// and the exit code, and extracts a transaction hash when stdout is JSON.
/// Every failure mode (missing binary, spawn fault, timeout) is folded into
/// a `CommandOutcome` with `exit_code = 1`; this never fails outward.
pub struct Executor {
    binary_path: PathBuf,
    timeout: Duration,
}

impl Executor {
    pub fn new(binary_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary_path: binary_path.into(),
            timeout,
        }
    }

    /// Run the binary with the given arguments
    ///
    /// The child inherits the current environment, plus `NETWORK_SECRET`
    /// when the network carries a non-empty shared secret. With
    /// `needs_confirmation` the literal `yes` answer is written to the
    /// child's stdin for subcommands that prompt interactively.
    ///
    /// The calling task suspends until the child exits. A child still
    /// running when the configured timeout expires is killed and reported
    /// as a failure outcome.
    pub async fn execute(
        &self,
        args: &[String],
        network: &NetworkConfig,
        needs_confirmation: bool,
    ) -> CommandOutcome {
        let metadata = match fs::metadata(&self.binary_path) {
            Ok(metadata) => metadata,
            Err(_) => {
                let message = format!("node binary not found at {}", self.binary_path.display());
                error!("{}", message);
                return CommandOutcome::failure(message);
            }
        };
        let mode = metadata.permissions().mode();
        debug!("Binary mode: {:o}, executable: {}", mode, mode & 0o100 != 0);
        if mode & 0o100 == 0 {
            // spawn will fail below and surface through the fault path
            warn!(
                "Binary at {} is not marked executable",
                self.binary_path.display()
            );
        }

        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if needs_confirmation {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);
        if !network.shared_secret.is_empty() {
            command.env("NETWORK_SECRET", &network.shared_secret);
        }

        info!(
            "Executing command: {} {}",
            self.binary_path.display(),
            args.join(" ")
        );

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!("Error executing command: {}", err);
                return CommandOutcome::failure(err.to_string());
            }
        };

        if needs_confirmation {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(err) = stdin.write_all(b"yes\n").await {
                    warn!("Failed to write confirmation input: {}", err);
                }
                // dropping the handle closes the pipe
            }
        }

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                error!("Error executing command: {}", err);
                return CommandOutcome::failure(err.to_string());
            }
            Err(_) => {
                let message = format!("command timed out after {}s", self.timeout.as_secs());
                error!("{}", message);
                return CommandOutcome::failure(message);
            }
        };

        // a signal-terminated child reports no code; treat it as a failure
        let exit_code = output.status.code().unwrap_or(1);
        info!("Command exit code: {}", exit_code);

        let raw_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let (stdout, tx_hash) = reshape_stdout(raw_stdout);

        CommandOutcome {
            stdout,
            stderr,
            exit_code,
            tx_hash,
        }
    }
}

/// Partial view of a broadcast result; all other fields are ignored.
#[derive(Debug, Deserialize)]
struct TxFields {
    #[serde(default)]
    txhash: Option<String>,
}

/// Pretty-print JSON stdout and pull out the transaction hash
///
/// Non-JSON stdout is the expected case for human-readable subcommands and
/// passes through untouched with no hash.
fn reshape_stdout(stdout: String) -> (String, Option<String>) {
    if stdout.trim().is_empty() {
        return (stdout, None);
    }
    match serde_json::from_str::<Value>(&stdout) {
        Ok(value) => {
            let tx_hash = serde_json::from_value::<TxFields>(value.clone())
                .ok()
                .and_then(|fields| fields.txhash);
            let pretty = serde_json::to_string_pretty(&value).unwrap_or(stdout);
            (pretty, tx_hash)
        }
        Err(_) => (stdout, None),
    }
}
