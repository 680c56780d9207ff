use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PersonalInfoRow {
    pub id: i64,
    pub account_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub linkedin_url: Option<String>,
    pub personal_url: Option<String>,
    pub country: String,
    pub state: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SummaryRow {
    pub id: i64,
    pub account_id: i64,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct WorkExperienceRow {
    pub id: i64,
    pub account_id: i64,
    pub role: String,
    pub company: String,
    pub location: String,
    pub summary: String,
    pub start_date: DateTime<Utc>,
    /// `None` while the role is current.
    pub end_date: Option<DateTime<Utc>>,
}

/// Writable personal info columns, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfoFields {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub personal_url: Option<String>,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// Writable work experience columns, shared by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkExperienceFields {
    pub role: String,
    pub company: String,
    pub location: String,
    pub summary: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}
