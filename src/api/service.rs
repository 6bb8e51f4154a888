//! Service endpoints
//!
//! Registering a service on the network and querying one back.

use crate::api::account::NetworkQuery;
use crate::api::auth::Identity;
use crate::api::error::ApiError;
use crate::api::server::AppState;
use crate::{CommandOutcome, ServiceRequest};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

pub(crate) fn routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_service))
        .route("/:service_id", get(get_service))
}

/// Register a new service on the network
async fn create_service(
    State(state): State<AppState>,
    _identity: Identity,
    Json(request): Json<ServiceRequest>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let command = vec![
        "tx".to_string(),
        "service".to_string(),
        "add-service".to_string(),
        request.service_id,
        request.service_name,
        request.compute_units.to_string(),
        "--from".to_string(),
        request.from_account,
        "--yes".to_string(),
    ];
    let outcome = state.runner.run(&command, &request.network, false).await;
    if !outcome.succeeded() {
        return Err(ApiError::internal(format!(
            "Failed to create service: {}",
            outcome.stderr
        )));
    }
    Ok(Json(outcome))
}

/// Service information, outcome returned as-is
async fn get_service(
    State(state): State<AppState>,
    _identity: Identity,
    Path(service_id): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Json<CommandOutcome> {
    let command = vec![
        "query".to_string(),
        "service".to_string(),
        "show-service".to_string(),
        service_id,
    ];
    Json(state.runner.run(&command, &query.network, false).await)
}
