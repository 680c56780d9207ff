//! Signed bearer tokens (HS256 JWT).
//!
//! A token moves through Issued -> Valid | Expired | Invalid. There is no
//! revocation; expiry is the only way a genuine token stops working.
//! Verification pins the algorithm and checks the signature before expiry,
//! so a forged token is always `Invalid` and only a genuinely signed token
//! can come back `Expired`.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum signing secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token secret must be at least 32 bytes, got {0}")]
    SecretTooShort(usize),

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,

    #[error("token duration is out of range")]
    DurationOutOfRange,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    #[serde(rename = "jti")]
    pub id: Uuid,
    #[serde(rename = "sub")]
    pub subject: String,
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl Payload {
    /// Builds a payload issued now and valid for `duration`.
    /// Timestamps are truncated to whole seconds, the JWT resolution.
    pub fn new(subject: &str, duration: Duration) -> Result<Self, TokenError> {
        let issued_at = Utc::now().trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(duration)
            .ok_or(TokenError::DurationOutOfRange)?;
        Ok(Payload {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            issued_at,
            expires_at,
        })
    }
}

/// Issues and verifies tokens with a symmetric secret.
/// Built once at startup; cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct TokenMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenMaker {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::SecretTooShort(secret.len()));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(TokenMaker {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Signs a fresh payload for `subject`. Returns the token and its payload.
    pub fn create_token(
        &self,
        subject: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(subject, duration)?;
        let token = encode(&Header::new(ALGORITHM), &payload, &self.encoding_key)
            .map_err(TokenError::Signing)?;
        Ok((token, payload))
    }

    pub fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        match decode::<Payload>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }
}
