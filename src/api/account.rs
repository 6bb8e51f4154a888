//! Account endpoints
//!
//! Key management (create, import, export), faucet funding, raw account
//! queries, and the cached sequence endpoints transaction builders use.

use crate::api::auth::Identity;
use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::registry::DEFAULT_NETWORK;
use crate::{AccountResponse, CommandOutcome, CreateAccountRequest, FundAccountRequest,
    ImportHexRequest, SequenceResponse};
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_account))
        .route("/create-mock", post(create_account_mock))
        .route("/import-hex", post(import_account_hex))
        .route("/export-hex/:name", get(export_account_hex))
        .route("/fund", post(fund_account))
        .route("/sequence", delete(clear_sequence_cache))
        .route("/:address", get(get_account))
        .route("/:address/sequence", get(get_sequence).delete(evict_sequence))
        .route("/:address/sequence/advance", post(advance_sequence))
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_increment() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkQuery {
    #[serde(default = "default_network")]
    pub network: String,
}

#[derive(Debug, Deserialize)]
struct AdvanceRequest {
    #[serde(default = "default_network")]
    network: String,
    #[serde(default = "default_increment")]
    increment: u64,
}

/// Partial view of the binary's `keys add` output
#[derive(Debug, Deserialize)]
struct NewKeyFields {
    #[serde(default)]
    address: String,
    #[serde(default)]
    mnemonic: String,
}

fn random_key_name() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("user_{suffix}")
}

async fn create_key(
    state: &AppState,
    request: CreateAccountRequest,
) -> Result<Json<AccountResponse>, ApiError> {
    let key_name = request.key_name.unwrap_or_else(random_key_name);
    let command = vec![
        "keys".to_string(),
        "add".to_string(),
        key_name.clone(),
        "--output".to_string(),
        "json".to_string(),
    ];
    let outcome = state.runner.run(&command, &request.network, false).await;
    if !outcome.succeeded() {
        return Err(ApiError::internal(format!(
            "Failed to create account: {}",
            outcome.stderr
        )));
    }
    let key: NewKeyFields = serde_json::from_str(&outcome.stdout).map_err(|_| {
        ApiError::internal(format!("Failed to parse account data: {}", outcome.stdout))
    })?;
    info!("Created key '{}' with address {}", key_name, key.address);
    Ok(Json(AccountResponse {
        address: key.address,
        name: key_name,
        mnemonic: key.mnemonic,
        message: "Account created successfully".to_string(),
    }))
}

/// Create a new account (wallet) in the keyring
async fn create_account(
    State(state): State<AppState>,
    _identity: Identity,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    create_key(&state, request).await
}

/// Create a new account without authentication (frontend development)
async fn create_account_mock(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    create_key(&state, request).await
}

/// Import a private key from a hex string
async fn import_account_hex(
    State(state): State<AppState>,
    Json(request): Json<ImportHexRequest>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let outcome = state
        .runner
        .import_hex_key(&request.name, &request.hex_key, &request.network)
        .await;
    if !outcome.succeeded() {
        return Err(ApiError::internal(format!(
            "Failed to import hex key: {}",
            outcome.stderr
        )));
    }
    Ok(Json(CommandOutcome {
        stdout: format!("Imported key {}", request.name),
        stderr: String::new(),
        exit_code: 0,
        tx_hash: None,
    }))
}

/// Export a private key as an unarmored hex string
///
/// WARNING: unsafe, for demo/dev use only.
async fn export_account_hex(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Result<Json<Value>, ApiError> {
    let command = vec![
        "keys".to_string(),
        "export".to_string(),
        name,
        "--unsafe".to_string(),
        "--unarmored-hex".to_string(),
        format!("--home={}", state.config.keyring.home),
    ];
    let outcome = state.runner.run(&command, &query.network, true).await;
    if !outcome.succeeded() {
        return Err(ApiError::internal(format!(
            "Failed to export private key: {}",
            outcome.stderr
        )));
    }
    let hex = outcome.stdout.trim().replace('\n', "");
    Ok(Json(json!({ "hex": hex })))
}

/// Fund an address from a keyring account
async fn fund_account(
    State(state): State<AppState>,
    _identity: Identity,
    Json(request): Json<FundAccountRequest>,
) -> Result<Json<CommandOutcome>, ApiError> {
    if !state
        .runner
        .key_exists(&request.from_account, &request.network)
        .await
    {
        return Err(ApiError::bad_request(format!(
            "Unknown funding account: {}",
            request.from_account
        )));
    }
    let amount = request
        .amount
        .unwrap_or_else(|| state.config.funding.default_amount.clone());
    let command = vec![
        "tx".to_string(),
        "bank".to_string(),
        "send".to_string(),
        request.from_account,
        request.address,
        amount,
        "--yes".to_string(),
    ];
    let outcome = state.runner.run(&command, &request.network, false).await;
    if !outcome.succeeded() {
        return Err(ApiError::internal(format!(
            "Failed to fund account: {}",
            outcome.stderr
        )));
    }
    Ok(Json(outcome))
}

/// Raw account information, outcome returned as-is
async fn get_account(
    State(state): State<AppState>,
    _identity: Identity,
    Path(address): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Json<CommandOutcome> {
    let command = vec!["query".to_string(), "account".to_string(), address];
    Json(state.runner.run(&command, &query.network, false).await)
}

/// Cached account number and sequence for an address
async fn get_sequence(
    State(state): State<AppState>,
    _identity: Identity,
    Path(address): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Result<Json<SequenceResponse>, ApiError> {
    let account = state.resolver.get_state(&address, &query.network).await?;
    Ok(Json(SequenceResponse {
        address,
        network: query.network,
        account_number: account.account_number,
        sequence: account.sequence,
    }))
}

/// Bump the cached sequence after a successful submission
async fn advance_sequence(
    State(state): State<AppState>,
    _identity: Identity,
    Path(address): Path<String>,
    Json(request): Json<AdvanceRequest>,
) -> Json<Value> {
    match state
        .resolver
        .advance_sequence(&address, &request.network, request.increment)
        .await
    {
        Some(account) => Json(json!({
            "advanced": true,
            "account_number": account.account_number,
            "sequence": account.sequence,
        })),
        None => Json(json!({ "advanced": false })),
    }
}

/// Drop the cached entry for one address
async fn evict_sequence(
    State(state): State<AppState>,
    _identity: Identity,
    Path(address): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Json<Value> {
    let evicted = state.resolver.evict(&address, &query.network).await;
    Json(json!({ "evicted": evicted }))
}

/// Clear every cached sequence entry
async fn clear_sequence_cache(
    State(state): State<AppState>,
    _identity: Identity,
) -> Json<Value> {
    state.resolver.clear().await;
    Json(json!({ "cleared": true }))
}
