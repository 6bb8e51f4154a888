use crate::api::error::ApiError;
use crate::api::server::AppState;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use thiserror::Error;

/// Authenticated caller identity
///
/// Supplied by the token verifier; the gateway itself never inspects
/// credentials.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
    pub email: String,
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("invalid authentication credentials")]
    InvalidToken,
}

/// Boundary to the external identity provider
///
/// `verify` maps a bearer token to the caller behind it or rejects it.
/// Real deployments implement this with JWT verification against the
/// provider's public key.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Development verifier accepting any non-empty bearer token
pub struct DevTokenVerifier;

impl TokenVerifier for DevTokenVerifier {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(Identity {
            subject: "demo-user".to_string(),
            email: "user@example.com".to_string(),
        })
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;
        state.verifier.verify(token).map_err(|err| {
            ApiError::unauthorized(format!("Invalid authentication credentials: {err}"))
        })
    }
}
