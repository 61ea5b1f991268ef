//! Common test utilities for integration tests
//!
//! Every test app runs over its own in-memory store with the mock agent
//! delay disabled.

#![allow(dead_code)]

use adafit_backend::{config::AppConfig, routes, state::AppState, store::MemoryStore};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

/// Logged-in test user
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config, Arc::new(MemoryStore::new()))
            .expect("Failed to build test state");
        let app = routes::create_router(state.clone());
        Self { app, state }
    }

    /// App with a user already logged in
    pub async fn new_logged_in() -> Self {
        let app = Self::new();
        app.login().await;
        app
    }

    /// Log in a randomly named user
    pub async fn login(&self) -> TestUser {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let body = serde_json::json!({ "name": name, "email": email });

        let (status, user) = self.post("/api/auth/login", &body).await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", user);

        TestUser {
            id: user["id"].as_str().unwrap_or_default().to_string(),
            name,
            email,
        }
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send("GET", path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send("POST", path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send("PUT", path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.send("PATCH", path, Some(body)).await
    }

    /// Send a request and parse the body as JSON (`Null` when empty or not JSON)
    async fn send(&self, method: &str, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.agent.mock_delay_ms = 0;
    config
}
