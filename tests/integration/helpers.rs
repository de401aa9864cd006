//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use warden_api::AppState;
use warden_auth::{AuthService, JwtDecoder, MemoryOwnerDirectory, MemoryTokenRegistry, PasswordHasher};
use warden_core::config::AppConfig;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::{Owner, OwnerStatus};
use warden_entity::token::TokenKind;

/// Configuration used by every test app.
pub const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused@localhost/unused"

[auth]
access_signing_key = "integration-access-key"
refresh_signing_key = "integration-refresh-key"
access_ttl_minutes = 15
refresh_ttl_hours = 168

[maintenance]
registry_sweep_enabled = false

[logging]
level = "warn"
format = "pretty"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Registry behind the router, for direct inspection
    pub registry: Arc<MemoryTokenRegistry>,
    /// Owner directory behind the router
    pub directory: Arc<MemoryOwnerDirectory>,
    /// Application config
    pub config: AppConfig,
}

/// Tokens returned by a successful login or refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub session_id: TokenId,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self::with_config(TEST_CONFIG)
    }

    /// Create a test application from a TOML document
    pub fn with_config(toml: &str) -> Self {
        let config = AppConfig::from_toml(toml).expect("Failed to parse test config");

        let registry = Arc::new(MemoryTokenRegistry::new());
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("hasher params");
        let directory = Arc::new(MemoryOwnerDirectory::with_hasher(hasher));

        let auth = Arc::new(AuthService::new(
            &config.auth,
            registry.clone(),
            directory.clone(),
            directory.clone(),
        ));
        let router = warden_api::build_router(AppState::new(Arc::new(config.clone()), auth));

        Self {
            router,
            registry,
            directory,
            config,
        }
    }

    /// Create an active owner
    pub async fn create_owner(&self, id: i64, email: &str, password: &str) -> Owner {
        self.directory
            .add_owner(OwnerId(id), email, password, OwnerStatus::Active)
            .await
            .expect("Failed to create owner")
    }

    /// Login and return the issued pair
    pub async fn login(&self, email: &str, password: &str) -> TokenPair {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.token_pair()
    }

    /// Rotate a refresh token
    pub async fn refresh(&self, refresh_token: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await
    }

    /// `jti` of a refresh token, read without consulting the registry
    pub fn refresh_token_id(&self, refresh_token: &str) -> TokenId {
        JwtDecoder::new(&self.config.auth)
            .decode(refresh_token, TokenKind::Refresh)
            .expect("decode refresh token")
            .jti
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Make an HTTP request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// Token pair from a login or refresh response
    pub fn token_pair(&self) -> TokenPair {
        let data = self.data();
        let field = |name: &str| {
            data[name]
                .as_str()
                .unwrap_or_else(|| panic!("No {name} in response: {:?}", self.body))
                .to_string()
        };

        TokenPair {
            access_token: field("access_token"),
            refresh_token: field("refresh_token"),
            session_id: field("session_id").parse().expect("session id"),
        }
    }

    /// Asserts the uniform rejection returned for every token failure
    pub fn assert_not_authorized(&self) {
        assert_eq!(self.status, StatusCode::FORBIDDEN, "body: {:?}", self.body);
        assert_eq!(
            self.body,
            serde_json::json!({ "error": "FORBIDDEN", "message": "Not authorized" })
        );
    }
}
