use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::account::AccountRow;
use crate::models::resume::{
    PersonalInfoFields, PersonalInfoRow, SummaryRow, WorkExperienceFields, WorkExperienceRow,
};
use crate::store::{lookup_violation, NewAccount, Store, StoreError};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

/// Maps named constraint violations through `CONSTRAINT_VIOLATIONS`;
/// everything else stays a database error.
fn translate(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(violation) = db_err.constraint().and_then(lookup_violation) {
            return violation.into();
        }
    }
    StoreError::Database(err)
}

fn expect_deleted(rows_affected: u64, entity: &'static str) -> Result<(), StoreError> {
    if rows_affected == 0 {
        return Err(StoreError::NotFound(entity));
    }
    Ok(())
}

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, account: NewAccount) -> Result<AccountRow, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_account(&self, id: i64) -> Result<AccountRow, StoreError> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(StoreError::NotFound("account"))
    }

    async fn get_account_by_email(&self, email: &str) -> Result<AccountRow, StoreError> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(StoreError::NotFound("account"))
    }

    async fn update_account(&self, id: i64, full_name: &str) -> Result<AccountRow, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "UPDATE accounts SET full_name = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(StoreError::NotFound("account"))
    }

    async fn verify_account(&self, id: i64) -> Result<AccountRow, StoreError> {
        // updated_at only moves on the first verification
        sqlx::query_as::<_, AccountRow>(
            r#"
            UPDATE accounts
            SET is_verified = true,
                updated_at = CASE WHEN is_verified THEN updated_at ELSE now() END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(StoreError::NotFound("account"))
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        expect_deleted(result.rows_affected(), "account")
    }

    async fn create_personal_info(
        &self,
        account_id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError> {
        sqlx::query_as::<_, PersonalInfoRow>(
            r#"
            INSERT INTO personal_info
                (account_id, full_name, email, phone_number, linkedin_url,
                 personal_url, country, state, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone_number)
        .bind(&fields.linkedin_url)
        .bind(&fields.personal_url)
        .bind(&fields.country)
        .bind(&fields.state)
        .bind(&fields.city)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_personal_info(&self, id: i64) -> Result<PersonalInfoRow, StoreError> {
        sqlx::query_as::<_, PersonalInfoRow>("SELECT * FROM personal_info WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(StoreError::NotFound("personal info"))
    }

    async fn update_personal_info(
        &self,
        id: i64,
        fields: &PersonalInfoFields,
    ) -> Result<PersonalInfoRow, StoreError> {
        sqlx::query_as::<_, PersonalInfoRow>(
            r#"
            UPDATE personal_info
            SET full_name = $2, email = $3, phone_number = $4, linkedin_url = $5,
                personal_url = $6, country = $7, state = $8, city = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.full_name)
        .bind(&fields.email)
        .bind(&fields.phone_number)
        .bind(&fields.linkedin_url)
        .bind(&fields.personal_url)
        .bind(&fields.country)
        .bind(&fields.state)
        .bind(&fields.city)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(StoreError::NotFound("personal info"))
    }

    async fn delete_personal_info(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM personal_info WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        expect_deleted(result.rows_affected(), "personal info")
    }

    async fn create_summary(
        &self,
        account_id: i64,
        summary: &str,
    ) -> Result<SummaryRow, StoreError> {
        sqlx::query_as::<_, SummaryRow>(
            "INSERT INTO summaries (account_id, summary) VALUES ($1, $2) RETURNING *",
        )
        .bind(account_id)
        .bind(summary)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_summary(&self, id: i64) -> Result<SummaryRow, StoreError> {
        sqlx::query_as::<_, SummaryRow>("SELECT * FROM summaries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(StoreError::NotFound("summary"))
    }

    async fn update_summary(&self, id: i64, summary: &str) -> Result<SummaryRow, StoreError> {
        sqlx::query_as::<_, SummaryRow>(
            "UPDATE summaries SET summary = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(summary)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(StoreError::NotFound("summary"))
    }

    async fn delete_summary(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM summaries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        expect_deleted(result.rows_affected(), "summary")
    }

    async fn create_work_experience(
        &self,
        account_id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError> {
        sqlx::query_as::<_, WorkExperienceRow>(
            r#"
            INSERT INTO work_experiences
                (account_id, role, company, location, summary, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(account_id)
        .bind(&fields.role)
        .bind(&fields.company)
        .bind(&fields.location)
        .bind(&fields.summary)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_work_experience(&self, id: i64) -> Result<WorkExperienceRow, StoreError> {
        sqlx::query_as::<_, WorkExperienceRow>("SELECT * FROM work_experiences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(StoreError::NotFound("work experience"))
    }

    async fn list_work_experiences(
        &self,
        account_id: i64,
    ) -> Result<Vec<WorkExperienceRow>, StoreError> {
        sqlx::query_as::<_, WorkExperienceRow>(
            "SELECT * FROM work_experiences WHERE account_id = $1 ORDER BY start_date DESC, id DESC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(translate)
    }

    async fn update_work_experience(
        &self,
        id: i64,
        fields: &WorkExperienceFields,
    ) -> Result<WorkExperienceRow, StoreError> {
        sqlx::query_as::<_, WorkExperienceRow>(
            r#"
            UPDATE work_experiences
            SET role = $2, company = $3, location = $4, summary = $5,
                start_date = $6, end_date = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.role)
        .bind(&fields.company)
        .bind(&fields.location)
        .bind(&fields.summary)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(StoreError::NotFound("work experience"))
    }

    async fn delete_work_experience(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM work_experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        expect_deleted(result.rows_affected(), "work experience")
    }
}
