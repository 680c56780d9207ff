use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// An account row as stored, including the password hash.
/// Never serialized directly; render through `AccountResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_verified: bool,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_verified: bool,
}

impl From<AccountRow> for AccountResponse {
    fn from(row: AccountRow) -> Self {
        AccountResponse {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_verified: row.is_verified,
        }
    }
}
