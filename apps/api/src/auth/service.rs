//! Signup, login and account lifecycle, composed from the password hasher,
//! the token maker and the store.

use std::sync::Arc;

use anyhow::anyhow;
use chrono::Duration;
use tracing::{info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::token::{Payload, TokenMaker};
use crate::errors::AppError;
use crate::models::account::AccountRow;
use crate::store::{NewAccount, Store, StoreError};
use crate::validation;

/// Validity window of a token issued at login.
pub const LOGIN_TOKEN_DAYS: i64 = 7;

/// A successful login: the signed token, its claims, and the account.
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub payload: Payload,
    pub account: AccountRow,
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    tokens: TokenMaker,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, hasher: PasswordHasher, tokens: TokenMaker) -> Self {
        AccountService {
            store,
            hasher,
            tokens,
        }
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AccountRow, AppError> {
        validation::email("email", email)?;
        validation::password(password)?;
        validation::required("full_name", full_name, validation::MAX_FIELD_CHARS)?;

        let password_hash = self.hash_password(password.to_string()).await?;

        let account = self
            .store
            .create_account(NewAccount {
                email: email.to_string(),
                password_hash,
                full_name: full_name.to_string(),
            })
            .await?;

        info!("Created account {} for {}", account.id, account.email);
        Ok(account)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        validation::email("email", email)?;
        if password.is_empty() {
            return Err(AppError::Validation("password is required".to_string()));
        }

        let account = self.store.get_account_by_email(email).await?;

        if let Err(e) = self
            .check_password(password.to_string(), account.password_hash.clone())
            .await
        {
            if matches!(e, AppError::Unauthorized(_)) {
                warn!("Rejected login for account {}: wrong password", account.id);
            }
            return Err(e);
        }

        let (token, payload) = self
            .tokens
            .create_token(&account.email, Duration::days(LOGIN_TOKEN_DAYS))?;

        info!("Issued token {} for account {}", payload.id, account.id);
        Ok(LoginOutcome {
            token,
            payload,
            account,
        })
    }

    /// Marks the account verified. Verifying twice returns the same account.
    pub async fn verify_account(&self, id: i64) -> Result<AccountRow, AppError> {
        validation::positive_id("id", id)?;
        let account = self.store.verify_account(id).await?;
        info!("Account {id} verified");
        Ok(account)
    }

    pub async fn get_account(&self, id: i64) -> Result<AccountRow, AppError> {
        validation::positive_id("id", id)?;
        Ok(self.store.get_account(id).await?)
    }

    /// Resolves a verified token to the account it was issued for.
    pub async fn current_account(&self, payload: &Payload) -> Result<AccountRow, AppError> {
        match self.store.get_account_by_email(&payload.subject).await {
            Ok(account) => Ok(account),
            Err(StoreError::NotFound(_)) => Err(AppError::Unauthorized(
                "Account for this token no longer exists".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update_account(&self, id: i64, full_name: &str) -> Result<AccountRow, AppError> {
        validation::positive_id("id", id)?;
        validation::required("full_name", full_name, validation::MAX_FIELD_CHARS)?;
        Ok(self.store.update_account(id, full_name).await?)
    }

    pub async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        validation::positive_id("id", id)?;
        self.store.delete_account(id).await?;
        info!("Account {id} deleted");
        Ok(())
    }

    // bcrypt is CPU-bound; keep it off the async workers.

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow!("password hashing task failed: {e}")))?
            .map_err(AppError::from)
    }

    async fn check_password(&self, password: String, digest: String) -> Result<(), AppError> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Internal(anyhow!("password check task failed: {e}")))?
            .map_err(AppError::from)
    }
}
