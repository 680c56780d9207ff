use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::auth::token::{Payload, TokenError};
use crate::errors::AppError;
use crate::state::AppState;

/// Claims of a verified `Authorization: Bearer <token>` header.
/// Rejects with 401: `TOKEN_EXPIRED` for a genuine expired token,
/// `INVALID_TOKEN` for anything forged or malformed.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Payload);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Authorization header is missing".to_string()))?;

    let value = header.to_str().map_err(|_| AppError::InvalidToken)?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized(format!(
            "Unsupported authorization type {scheme}"
        )));
    }
    Ok(token.trim())
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        match state.tokens.verify_token(token) {
            Ok(payload) => Ok(Authenticated(payload)),
            Err(e) => {
                if matches!(e, TokenError::Invalid) {
                    warn!("Rejected bearer token on {}", parts.uri.path());
                }
                Err(e.into())
            }
        }
    }
}
