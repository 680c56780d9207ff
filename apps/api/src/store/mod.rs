//! Persistence boundary.
//!
//! Handlers and services talk to `dyn Store`; driver errors are translated
//! into `StoreError` here and never leak past this module.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::account::AccountRow;
use crate::models::resume::{
    PersonalInfoFields, PersonalInfoRow, SummaryRow, WorkExperienceFields, WorkExperienceRow,
};

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("email already in use")]
    DuplicateEmail,

    #[error("referenced account does not exist")]
    UnknownAccount,

    #[error(transparent)]
    Database(sqlx::Error),
}

/// Domain meaning of a named constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    DuplicateEmail,
    UnknownAccount,
}

/// Constraint names from the migrations, mapped to what a violation means.
pub const CONSTRAINT_VIOLATIONS: &[(&str, Violation)] = &[
    ("accounts_email_key", Violation::DuplicateEmail),
    ("personal_info_account_id_fkey", Violation::UnknownAccount),
    ("summaries_account_id_fkey", Violation::UnknownAccount),
    ("work_experiences_account_id_fkey", Violation::UnknownAccount),
];

pub fn lookup_violation(constraint: &str) -> Option<Violation> {
    CONSTRAINT_VIOLATIONS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, violation)| *violation)
}

impl From<Violation> for StoreError {
    fn from(v: Violation) -> Self {
        match v {
            Violation::DuplicateEmail => StoreError::DuplicateEmail,
            Violation::UnknownAccount => StoreError::UnknownAccount,
        }
    }
}

/// Columns needed to create an account. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
}

/// Typed CRUD over every persisted entity.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_account(&self, account: NewAccount) -> Result<AccountRow, StoreError>;
    async fn get_account(&self, id: i64) -> Result<AccountRow, StoreError>;
    async fn get_account_by_email(&self, email: &str) -> Result<AccountRow, StoreError>;
    async fn update_account(&self, id: i64, full_name: &str) -> Result<AccountRow, StoreError>;
    /// Sets `is_verified`; calling it on a verified account is a no-op.
    async fn verify_account(&self, id: i64) -> Result<AccountRow, StoreError>;
    async fn delete_account(&self, id: i64) -> Result<(), StoreError>;

    async fn create_personal_info(
        &self,
        account_id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError>;
    async fn get_personal_info(&self, id: i64) -> Result<PersonalInfoRow, StoreError>;
    async fn update_personal_info(
        &self,
        id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError>;
    async fn delete_personal_info(&self, id: i64) -> Result<(), StoreError>;

    async fn create_summary(&self, account_id: i64, summary: &str)
        -> Result<SummaryRow, StoreError>;
    async fn get_summary(&self, id: i64) -> Result<SummaryRow, StoreError>;
    async fn update_summary(&self, id: i64, summary: &str) -> Result<SummaryRow, StoreError>;
    async fn delete_summary(&self, id: i64) -> Result<(), StoreError>;

    async fn create_work_experience(
        &self,
        account_id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError>;
    async fn get_work_experience(&self, id: i64) -> Result<WorkExperienceRow, StoreError>;
    /// Newest first by start date.
    async fn list_work_experiences(
        &self,
        account_id: i64,
    ) -> Result<Vec<WorkExperienceRow>, StoreError>;
    async fn update_work_experience(
        &self,
        id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError>;
    async fn delete_work_experience(&self, id: i64) -> Result<(), StoreError>;
}
