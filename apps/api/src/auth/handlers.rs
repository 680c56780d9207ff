//! Axum route handlers for the Accounts API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::Authenticated;
use crate::errors::AppError;
use crate::models::account::AccountResponse;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountResponse,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub full_name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/accounts
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let Json(req) = payload?;
    let account = state
        .accounts
        .signup(&req.email, &req.password, &req.full_name)
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// POST /api/v1/accounts/login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    let outcome = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        token: outcome.token,
        expires_at: outcome.payload.expires_at,
        account: outcome.account.into(),
    }))
}

/// GET /api/v1/accounts/me
pub async fn handle_me(
    State(state): State<AppState>,
    Authenticated(payload): Authenticated,
) -> Result<Json<AccountResponse>, AppError> {
    let account = state.accounts.current_account(&payload).await?;
    Ok(Json(account.into()))
}

/// GET /api/v1/accounts/:id
pub async fn handle_get_account(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(id) = path?;
    let account = state.accounts.get_account(id).await?;
    Ok(Json(account.into()))
}

/// PUT /api/v1/accounts/:id
pub async fn handle_update_account(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let account = state.accounts.update_account(id, &req.full_name).await?;
    Ok(Json(account.into()))
}

/// DELETE /api/v1/accounts/:id
pub async fn handle_delete_account(
    State(state): State<AppState>,
    _auth: Authenticated,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.accounts.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/accounts/:id/verify
///
/// Target of the verification link; does not require a token.
pub async fn handle_verify_account(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Path(id) = path?;
    let account = state.accounts.verify_account(id).await?;
    Ok(Json(account.into()))
}
