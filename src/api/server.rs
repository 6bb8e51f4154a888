//! API Server Module
//!
//! This module assembles the axum router, wires the shared components into
//! request handlers, and runs the HTTP listener.

use crate::api::auth::{DevTokenVerifier, TokenVerifier};
use crate::api::{account, command, service};
use crate::command::{CommandRunner, Executor};
use crate::config::Config;
use crate::registry::NetworkRegistry;
use crate::state::{AccountCache, AccountResolver};
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared application state accessible across all request handlers
///
/// - `config`: loaded configuration (keyring paths, funding defaults)
/// - `runner`: executes node binary commands against a named network
/// - `resolver`: cached account number/sequence lookups
/// - `verifier`: the bearer-token boundary
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub runner: Arc<CommandRunner>,
    pub resolver: Arc<AccountResolver>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Create the server and its shared components from configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let registry = Arc::new(NetworkRegistry::from_config(&config)?);
        let executor = Executor::new(
            &config.binary.path,
            Duration::from_secs(config.binary.timeout_secs),
        );
        let runner = Arc::new(CommandRunner::new(registry, executor));
        let resolver = Arc::new(AccountResolver::new(AccountCache::new(), runner.clone()));

        let state = AppState {
            config: Arc::new(config.clone()),
            runner,
            resolver,
            verifier: Arc::new(DevTokenVerifier),
        };

        Ok(Self { config, state })
    }

    /// Bind the configured address and serve requests until shutdown
    pub async fn start(self) -> anyhow::Result<()> {
        let app = build_router(self.state);

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("Gateway API listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Assemble the full route tree with the CORS layer for the frontend
pub(crate) fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.allowed_origins);
    Router::new()
        .route("/", get(root))
        .route("/run", post(command::run_command))
        .route("/run-mock", post(command::run_mock_command))
        .nest("/account", account::routes())
        .nest("/service", service::routes())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Pocket Gateway API" }))
}
