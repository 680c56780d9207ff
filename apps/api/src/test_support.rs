//! Router-level test helpers over the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::password::{PasswordHasher, MIN_COST};
use crate::auth::service::AccountService;
use crate::auth::token::TokenMaker;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{memory::MemoryStore, Store};

pub const SECRET: &str = "fX7pL2wqE9vB1mZsKj4YtNcRx6HgQeAa";

pub fn test_state() -> AppState {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let tokens = TokenMaker::new(SECRET).unwrap();
    let accounts = AccountService::new(
        store.clone(),
        PasswordHasher::new(MIN_COST).unwrap(),
        tokens.clone(),
    );
    AppState::new(store, accounts, tokens)
}

pub fn test_app() -> Router {
    build_router(test_state())
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Signs up and logs in `email`, returning the account id and a bearer token.
pub async fn login_as(app: &Router, email: &str) -> (i64, String) {
    let (status, account) = send(
        app,
        Method::POST,
        "/api/v1/accounts",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": "1234567890",
            "full_name": "Test User"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, login) = send(
        app,
        Method::POST,
        "/api/v1/accounts/login",
        None,
        Some(serde_json::json!({ "email": email, "password": "1234567890" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        account["id"].as_i64().unwrap(),
        login["token"].as_str().unwrap().to_string(),
    )
}

/// Extracts `error.code` from an error body.
pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
