//! API Module
//!
//! This module implements the HTTP surface of the gateway: raw command
//! execution, account and service routes, the mock endpoints used by the
//! frontend without authentication, and the bearer-token boundary.

mod account;
mod auth;
mod command;
mod error;
mod server;
mod service;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, DevTokenVerifier, Identity, TokenVerifier};
pub use error::ApiError;
pub use server::{AppState, Server};
