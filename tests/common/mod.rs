//! Common test utilities for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use riyobox::{
    crypto::token::TokenIssuer,
    repositories::{InMemoryMovieStore, InMemoryUserStore},
    routes,
    services::auth::bootstrap_admin,
    storage::InMemoryObjectStore,
    AppState,
};
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret!";

/// A router wired to in-memory stores, plus handles for poking at them.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub objects: Arc<InMemoryObjectStore>,
}

/// Builds an app with the default admin already bootstrapped.
pub async fn create_test_app() -> TestApp {
    let objects = Arc::new(InMemoryObjectStore::new("test-bucket"));
    let state = AppState::from_parts(
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryMovieStore::new()),
        objects.clone(),
        TokenIssuer::new(TEST_SECRET, chrono::Duration::hours(1)),
    );

    bootstrap_admin(state.users.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("admin bootstrap failed");

    TestApp {
        router: routes::create_router(state.clone()),
        state,
        objects,
    }
}

impl TestApp {
    /// Sends a request and returns the status and the JSON body (`Null` if empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        use tower::ServiceExt;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body read failed")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Registers a user and returns their token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/register",
                None,
                json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Logs in and returns the token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/auth/login", None, json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Creates a movie as admin and returns its JSON.
    pub async fn create_movie(&self, admin_token: &str, movie: Value) -> Value {
        let (status, body) = self.post("/admin/movies", Some(admin_token), movie).await;
        assert_eq!(status, StatusCode::CREATED, "create movie failed: {}", body);
        body
    }
}

/// A minimal valid movie payload.
pub fn movie_json(title: &str) -> Value {
    json!({
        "title": title,
        "description": "d",
        "posterUrl": "p",
        "videoUrl": "v"
    })
}
