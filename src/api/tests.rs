//! Router tests
//!
//! Drive the assembled router in-process with `tower::ServiceExt::oneshot`,
//! backed by a stand-in binary script where a route shells out.

#[cfg(test)]
mod tests {
    use crate::api::auth::DevTokenVerifier;
    use crate::api::server::{AppState, build_router};
    use crate::command::{CommandRunner, Executor};
    use crate::config::Config;
    use crate::registry::NetworkRegistry;
    use crate::state::{AccountCache, AccountResolver};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state_with_script(dir: &TempDir, body: &str) -> AppState {
        let script = dir.path().join("pocketd");
        fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        let mut config = Config::default();
        config.binary.path = script.to_str().unwrap().to_string();
        let config = Arc::new(config);

        let registry = Arc::new(NetworkRegistry::from_config(&config).unwrap());
        let executor = Executor::new(&config.binary.path, Duration::from_secs(5));
        let runner = Arc::new(CommandRunner::new(registry, executor));
        let resolver = Arc::new(AccountResolver::new(AccountCache::new(), runner.clone()));
        AppState {
            config,
            runner,
            resolver,
            verifier: Arc::new(DevTokenVerifier),
        }
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn root_returns_the_welcome_message() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "exit 0"));

        let (status, body) = send(app, get("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to Pocket Gateway API");
    }

    #[tokio::test]
    async fn run_requires_a_bearer_token() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "exit 0"));

        let request = post_json("/run", json!({ "command": ["query", "block"] }), None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn run_executes_the_command_and_reports_the_hash() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(
            &dir,
            r#"echo '{"txhash":"AB12","code":0}'"#,
        ));

        let request = post_json(
            "/run",
            json!({ "command": ["tx", "bank", "send", "a", "b", "1upokt"] }),
            Some("token"),
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exit_code"], 0);
        assert_eq!(body["txhash"], "AB12");
    }

    #[tokio::test]
    async fn run_mock_answers_account_queries_without_auth() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "exit 0"));

        let request = post_json(
            "/run-mock",
            json!({ "command": ["query", "account", "pocket1abc"] }),
            None,
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exit_code"], 0);
        assert!(body["stdout"].as_str().unwrap().contains("pocket1abcdef123456789"));
        assert!(body["txhash"].is_null());
    }

    #[tokio::test]
    async fn run_mock_reports_a_hash_for_tx_commands() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "exit 0"));

        let request = post_json(
            "/run-mock",
            json!({ "command": ["tx", "bank", "send", "a", "b", "1upokt"] }),
            None,
        );
        let (_, body) = send(app, request).await;
        assert_eq!(body["txhash"], "ABCDEF1234567890");
    }

    #[tokio::test]
    async fn create_mock_parses_the_new_key() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(
            &dir,
            r#"echo '{"address":"pocket1xyz","mnemonic":"maze echo harbor"}'"#,
        ));

        let request = post_json("/account/create-mock", json!({}), None);
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["address"], "pocket1xyz");
        assert_eq!(body["mnemonic"], "maze echo harbor");
        assert!(body["name"].as_str().unwrap().starts_with("user_"));
        assert_eq!(body["message"], "Account created successfully");
    }

    #[tokio::test]
    async fn create_failure_maps_to_a_detail_body() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "echo 'keyring locked' >&2\nexit 1"));

        let request = post_json("/account/create-mock", json!({}), None);
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("keyring locked"));
    }

    #[tokio::test]
    async fn sequence_endpoints_resolve_advance_and_evict() {
        let dir = TempDir::new().unwrap();
        let state = state_with_script(
            &dir,
            r#"echo '{"account":{"value":{"account_number":"7","sequence":"5"}}}'"#,
        );

        let (status, body) = send(
            build_router(state.clone()),
            get("/account/pocket1abc/sequence", Some("token")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account_number"], 7);
        assert_eq!(body["sequence"], 5);

        let (_, body) = send(
            build_router(state.clone()),
            post_json(
                "/account/pocket1abc/sequence/advance",
                json!({}),
                Some("token"),
            ),
        )
        .await;
        assert_eq!(body["advanced"], true);
        assert_eq!(body["sequence"], 6);

        let (_, body) = send(
            build_router(state.clone()),
            get("/account/pocket1abc/sequence", Some("token")),
        )
        .await;
        assert_eq!(body["sequence"], 6);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/account/pocket1abc/sequence")
            .header(header::AUTHORIZATION, "Bearer token")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(build_router(state), request).await;
        assert_eq!(body["evicted"], true);
    }

    #[tokio::test]
    async fn advance_without_a_cached_entry_reports_nothing_advanced() {
        let dir = TempDir::new().unwrap();
        let app = build_router(state_with_script(&dir, "exit 0"));

        let request = post_json(
            "/account/pocket1ghost/sequence/advance",
            json!({}),
            Some("token"),
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["advanced"], false);
    }

    #[tokio::test]
    async fn fund_rejects_an_unknown_funding_key() {
        let dir = TempDir::new().unwrap();
        // every command fails, so the key-exists probe reports missing
        let app = build_router(state_with_script(&dir, "exit 1"));

        let request = post_json(
            "/account/fund",
            json!({ "address": "pocket1abc", "from_account": "ghost" }),
            Some("token"),
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("ghost"));
    }
}
