//! Raw command execution endpoints
//!
//! `/run` executes an arbitrary command vector through the runner; the flag
//! builder fills in whatever network flags the caller left out. `/run-mock`
//! serves canned responses so the frontend can be developed without a node
//! binary.

use crate::api::auth::Identity;
use crate::api::server::AppState;
use crate::{CommandOutcome, CommandRequest};
use axum::Json;
use axum::extract::State;
use serde_json::json;
use tracing::info;

pub(crate) async fn run_command(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CommandRequest>,
) -> Json<CommandOutcome> {
    info!(
        "Running command for {} on {}: {:?}",
        identity.subject, request.network, request.command
    );
    let outcome = state.runner.run(&request.command, &request.network, false).await;
    Json(outcome)
}

/// Mock endpoint for testing without authentication
pub(crate) async fn run_mock_command(Json(request): Json<CommandRequest>) -> Json<CommandOutcome> {
    let command = request.command.join(" ");
    let payload = if command.contains("query account") {
        json!({
            "address": "pocket1abcdef123456789",
            "balance": "1000000",
            "nonce": 5,
        })
    } else if command.contains("query validator") {
        json!({
            "address": "pocket1validator123456789",
            "status": "staked",
            "stake_amount": "15000000",
            "service_url": "https://validator.example.com",
        })
    } else if command.contains("query supplier") {
        json!({
            "address": "pocket1supplier123456789",
            "status": "staked",
            "stake_amount": "10000000",
            "service_url": "https://supplier.example.com",
        })
    } else {
        json!({
            "txhash": "ABCDEF1234567890",
            "code": 0,
            "log": "success",
        })
    };

    let tx_hash = payload
        .get("txhash")
        .and_then(|value| value.as_str())
        .map(String::from);
    Json(CommandOutcome {
        stdout: serde_json::to_string_pretty(&payload).unwrap_or_default(),
        stderr: String::new(),
        exit_code: 0,
        tx_hash,
    })
}
