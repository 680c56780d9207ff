//! In-memory `Store` for tests. Mirrors the Postgres constraints: unique
//! account email, account foreign keys, and cascading account deletes.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::account::AccountRow;
use crate::models::resume::{
    PersonalInfoFields, PersonalInfoRow, SummaryRow, WorkExperienceFields, WorkExperienceRow,
};
use crate::store::{NewAccount, Store, StoreError};

#[derive(Default)]
struct Tables {
    next_id: i64,
    accounts: BTreeMap<i64, AccountRow>,
    personal_info: BTreeMap<i64, PersonalInfoRow>,
    summaries: BTreeMap<i64, SummaryRow>,
    work_experiences: BTreeMap<i64, WorkExperienceRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn require_account(&self, account_id: i64) -> Result<(), StoreError> {
        if self.accounts.contains_key(&account_id) {
            Ok(())
        } else {
            Err(StoreError::UnknownAccount)
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut tables)
    }
}

fn personal_info_row(id: i64, account_id: i64, fields: &PersonalInfoFields) -> PersonalInfoRow {
    PersonalInfoRow {
        id,
        account_id,
        full_name: fields.full_name.clone(),
        email: fields.email.clone(),
        phone_number: fields.phone_number.clone(),
        linkedin_url: fields.linkedin_url.clone(),
        personal_url: fields.personal_url.clone(),
        country: fields.country.clone(),
        state: fields.state.clone(),
        city: fields.city.clone(),
    }
}

fn work_experience_row(
    id: i64,
    account_id: i64,
    fields: &WorkExperienceFields,
) -> WorkExperienceRow {
    WorkExperienceRow {
        id,
        account_id,
        role: fields.role.clone(),
        company: fields.company.clone(),
        location: fields.location.clone(),
        summary: fields.summary.clone(),
        start_date: fields.start_date,
        end_date: fields.end_date,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<AccountRow, StoreError> {
        self.with(|t| {
            if t.accounts.values().any(|a| a.email == account.email) {
                return Err(StoreError::DuplicateEmail);
            }
            let now = Utc::now();
            let row = AccountRow {
                id: t.next_id(),
                email: account.email,
                password_hash: account.password_hash,
                full_name: account.full_name,
                created_at: now,
                updated_at: now,
                is_verified: false,
            };
            t.accounts.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn get_account(&self, id: i64) -> Result<AccountRow, StoreError> {
        self.with(|t| {
            t.accounts
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound("account"))
        })
    }

    async fn get_account_by_email(&self, email: &str) -> Result<AccountRow, StoreError> {
        self.with(|t| {
            t.accounts
                .values()
                .find(|a| a.email == email)
                .cloned()
                .ok_or(StoreError::NotFound("account"))
        })
    }

    async fn update_account(&self, id: i64, full_name: &str) -> Result<AccountRow, StoreError> {
        self.with(|t| {
            let row = t
                .accounts
                .get_mut(&id)
                .ok_or(StoreError::NotFound("account"))?;
            row.full_name = full_name.to_string();
            row.updated_at = Utc::now();
            Ok(row.clone())
        })
    }

    async fn verify_account(&self, id: i64) -> Result<AccountRow, StoreError> {
        self.with(|t| {
            let row = t
                .accounts
                .get_mut(&id)
                .ok_or(StoreError::NotFound("account"))?;
            if !row.is_verified {
                row.is_verified = true;
                row.updated_at = Utc::now();
            }
            Ok(row.clone())
        })
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.accounts
                .remove(&id)
                .ok_or(StoreError::NotFound("account"))?;
            t.personal_info.retain(|_, r| r.account_id != id);
            t.summaries.retain(|_, r| r.account_id != id);
            t.work_experiences.retain(|_, r| r.account_id != id);
            Ok(())
        })
    }

    async fn create_personal_info(
        &self,
        account_id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError> {
        self.with(|t| {
            t.require_account(account_id)?;
            let row = personal_info_row(t.next_id(), account_id, fields);
            t.personal_info.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn get_personal_info(&self, id: i64) -> Result<PersonalInfoRow, StoreError> {
        self.with(|t| {
            t.personal_info
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound("personal info"))
        })
    }

    async fn update_personal_info(
        &self,
        id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError> {
        self.with(|t| {
            let row = t
                .personal_info
                .get_mut(&id)
                .ok_or(StoreError::NotFound("personal info"))?;
            *row = personal_info_row(id, row.account_id, fields);
            Ok(row.clone())
        })
    }

    async fn delete_personal_info(&self, id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.personal_info
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound("personal info"))
        })
    }

    async fn create_summary(
        &self,
        account_id: i64,
        summary: &str,
    ) -> Result<SummaryRow, StoreError> {
        self.with(|t| {
            t.require_account(account_id)?;
            let row = SummaryRow {
                id: t.next_id(),
                account_id,
                summary: summary.to_string(),
            };
            t.summaries.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn get_summary(&self, id: i64) -> Result<SummaryRow, StoreError> {
        self.with(|t| {
            t.summaries
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound("summary"))
        })
    }

    async fn update_summary(&self, id: i64, summary: &str) -> Result<SummaryRow, StoreError> {
        self.with(|t| {
            let row = t
                .summaries
                .get_mut(&id)
                .ok_or(StoreError::NotFound("summary"))?;
            row.summary = summary.to_string();
            Ok(row.clone())
        })
    }

    async fn delete_summary(&self, id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.summaries
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound("summary"))
        })
    }

    async fn create_work_experience(
        &self,
        account_id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError> {
        self.with(|t| {
            t.require_account(account_id)?;
            let row = work_experience_row(t.next_id(), account_id, fields);
            t.work_experiences.insert(row.id, row.clone());
            Ok(row)
        })
    }

    async fn get_work_experience(&self, id: i64) -> Result<WorkExperienceRow, StoreError> {
        self.with(|t| {
            t.work_experiences
                .get(&id)
                .cloned()
                .ok_or(StoreError::NotFound("work experience"))
        })
    }

    async fn list_work_experiences(
        &self,
        account_id: i64,
    ) -> Result<Vec<WorkExperienceRow>, StoreError> {
        self.with(|t| {
            let mut rows: Vec<_> = t
                .work_experiences
                .values()
                .filter(|r| r.account_id == account_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
            Ok(rows)
        })
    }

    async fn update_work_experience(
        &self,
        id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError> {
        self.with(|t| {
            let row = t
                .work_experiences
                .get_mut(&id)
                .ok_or(StoreError::NotFound("work experience"))?;
            *row = work_experience_row(id, row.account_id, fields);
            Ok(row.clone())
        })
    }

    async fn delete_work_experience(&self, id: i64) -> Result<(), StoreError> {
        self.with(|t| {
            t.work_experiences
                .remove(&id)
                .map(|_| ())
                .ok_or(StoreError::NotFound("work experience"))
        })
    }
}
