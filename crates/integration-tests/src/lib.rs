//! Integration tests for SmartSales365.
//!
//! The storefront router runs in-process on an ephemeral port against a
//! `mockito` stand-in for the SmartSales365 REST backend; tests drive it
//! over real HTTP with a cookie-holding client, so sessions, HTMX fragments
//! and redirects behave exactly as they do in production.
//!
//! # Test Categories
//!
//! - `storefront_cart` - cart coordinator semantics through the UI surface
//! - `storefront_checkout` - payment flow gating and idempotency

use axum::Router;
use secrecy::SecretString;

use smartsales_storefront::config::{BackendConfig, StorefrontConfig, StripeConfig};
use smartsales_storefront::middleware::create_session_layer;
use smartsales_storefront::routes;
use smartsales_storefront::state::AppState;

/// A storefront instance wired to a mock backend.
pub struct TestContext {
    /// Base URL of the running storefront.
    pub base_url: String,
    /// Cookie-holding HTTP client.
    pub client: reqwest::Client,
    /// The mock SmartSales365 backend. Register expectations here.
    pub backend: mockito::ServerGuard,
}

impl TestContext {
    /// Spawn a storefront on an ephemeral port against a fresh mock backend.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        let backend = mockito::Server::new_async().await;

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("loopback address"),
            port: 0,
            base_url: "http://storefront.test".to_string(),
            // High-entropy literal; from_env() validation is not in play here
            session_secret: SecretString::from(
                "fJ2mX9qL4tR8wZ1cV5bN7hK3dG6sA0pYuE2iO8rT4mW6",
            ),
            api: BackendConfig {
                base_url: backend.url(),
            },
            stripe: StripeConfig {
                publishable_key: "pk_test_4eC39HqLyjWDarjtT1zdp7dc".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config.clone());
        let session_layer = create_session_layer(&config);

        let app = Router::new()
            .merge(routes::routes())
            .layer(session_layer)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        let mut headers = reqwest::header::HeaderMap::new();
        // The rate limiter keys on proxy headers
        headers.insert(
            "x-forwarded-for",
            reqwest::header::HeaderValue::from_static("127.0.0.1"),
        );

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()
            .expect("build client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            backend,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register the backend login mock and log the test user in.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails.
    pub async fn login(&mut self) {
        self.backend
            .mock("POST", "/login/")
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access": "test-access-token",
                    "refresh": "test-refresh-token",
                    "user": {"id": 1, "username": "ana", "email": "ana@example.com", "is_staff": false}
                }"#,
            )
            .create_async()
            .await;

        let response = self
            .client
            .post(self.url("/auth/login"))
            .form(&[("username", "ana"), ("password", "hunter2hunter2")])
            .send()
            .await
            .expect("login request");
        assert!(response.status().is_success() || response.status().is_redirection());
    }
}
