//! Request field rules. Every failure is an `AppError::Validation` (400).

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::errors::AppError;
use crate::models::resume::{PersonalInfoFields, WorkExperienceFields};

pub const MAX_FIELD_CHARS: usize = 255;
pub const MAX_SUMMARY_CHARS: usize = 3000;
pub const MIN_PASSWORD_CHARS: usize = 10;

fn invalid(message: String) -> AppError {
    AppError::Validation(message)
}

/// Non-blank and at most `max_chars` characters.
pub fn required(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    max_len(field, value, max_chars)
}

pub fn max_len(field: &str, value: &str, max_chars: usize) -> Result<(), AppError> {
    if value.chars().count() > max_chars {
        return Err(invalid(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}

pub fn positive_id(field: &str, id: i64) -> Result<(), AppError> {
    if id < 1 {
        return Err(invalid(format!("{field} must be a positive integer")));
    }
    Ok(())
}

/// Structural check only: one `@`, a non-empty local part, a dotted domain.
pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    required(field, value, MAX_FIELD_CHARS)?;

    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains("..")
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(invalid(format!("{field} must be a valid email address")));
    }
    Ok(())
}

/// Length rules for a new password. The upper bound is bcrypt's input limit.
pub fn password(value: &str) -> Result<(), AppError> {
    if value.chars().count() < MIN_PASSWORD_CHARS {
        return Err(invalid(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(invalid(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}

/// Treats an empty optional string as absent.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates personal info and normalizes its optional URLs.
pub fn personal_info(mut fields: PersonalInfoFields) -> Result<PersonalInfoFields, AppError> {
    email("email", &fields.email)?;
    required("full_name", &fields.full_name, MAX_FIELD_CHARS)?;
    required("phone_number", &fields.phone_number, MAX_FIELD_CHARS)?;
    required("country", &fields.country, MAX_FIELD_CHARS)?;
    required("state", &fields.state, MAX_FIELD_CHARS)?;
    required("city", &fields.city, MAX_FIELD_CHARS)?;

    fields.linkedin_url = blank_to_none(fields.linkedin_url);
    fields.personal_url = blank_to_none(fields.personal_url);
    if let Some(url) = &fields.linkedin_url {
        max_len("linkedin_url", url, MAX_FIELD_CHARS)?;
    }
    if let Some(url) = &fields.personal_url {
        max_len("personal_url", url, MAX_FIELD_CHARS)?;
    }
    Ok(fields)
}

pub fn summary(value: &str) -> Result<(), AppError> {
    required("summary", value, MAX_SUMMARY_CHARS)
}

pub fn work_experience(fields: &WorkExperienceFields) -> Result<(), AppError> {
    required("role", &fields.role, MAX_FIELD_CHARS)?;
    required("company", &fields.company, MAX_FIELD_CHARS)?;
    required("location", &fields.location, MAX_FIELD_CHARS)?;
    required("summary", &fields.summary, MAX_FIELD_CHARS)?;
    if let Some(end) = fields.end_date {
        if end < fields.start_date {
            return Err(invalid("end_date must not be before start_date".to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn is_validation(r: Result<(), AppError>) -> bool {
        matches!(r, Err(AppError::Validation(_)))
    }

    fn sample_personal_info() -> PersonalInfoFields {
        PersonalInfoFields {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "+44 20 7946 0958".to_string(),
            linkedin_url: Some(String::new()),
            personal_url: Some("https://ada.dev".to_string()),
            country: "UK".to_string(),
            state: "England".to_string(),
            city: "London".to_string(),
        }
    }

    fn sample_work_experience() -> WorkExperienceFields {
        WorkExperienceFields {
            role: "Engineer".to_string(),
            company: "Analytical Engines Ltd".to_string(),
            location: "London".to_string(),
            summary: "Wrote the first published algorithm".to_string(),
            start_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end_date: None,
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(email("email", "a@b.com").is_ok());
        assert!(email("email", "first.last+tag@sub.example.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for bad in ["", "plain", "@b.com", "a@b", "a@.com", "a@b.com.", "a@@b.com", "a b@c.com", "a@b..com"] {
            assert!(is_validation(email("email", bad)), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(password("1234567890").is_ok());
        assert!(is_validation(password("123456789")));
        assert!(password(&"x".repeat(72)).is_ok());
        assert!(is_validation(password(&"x".repeat(73))));
    }

    #[test]
    fn test_password_counts_characters_not_bytes_for_minimum() {
        // 10 characters, 20 bytes
        assert!(password("éééééééééé").is_ok());
    }

    #[test]
    fn test_required_rejects_blank() {
        assert!(is_validation(required("city", "   ", MAX_FIELD_CHARS)));
        assert!(required("city", "Paris", MAX_FIELD_CHARS).is_ok());
    }

    #[test]
    fn test_max_len_boundary() {
        assert!(max_len("f", &"a".repeat(255), 255).is_ok());
        assert!(is_validation(max_len("f", &"a".repeat(256), 255)));
    }

    #[test]
    fn test_positive_id() {
        assert!(positive_id("id", 1).is_ok());
        assert!(is_validation(positive_id("id", 0)));
        assert!(is_validation(positive_id("id", -4)));
    }

    #[test]
    fn test_personal_info_normalizes_blank_urls() {
        let fields = personal_info(sample_personal_info()).unwrap();
        assert_eq!(fields.linkedin_url, None);
        assert_eq!(fields.personal_url.as_deref(), Some("https://ada.dev"));
    }

    #[test]
    fn test_personal_info_rejects_missing_phone() {
        let mut fields = sample_personal_info();
        fields.phone_number = String::new();
        assert!(matches!(personal_info(fields), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_personal_info_rejects_long_url() {
        let mut fields = sample_personal_info();
        fields.personal_url = Some(format!("https://{}", "a".repeat(255)));
        assert!(matches!(personal_info(fields), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_summary_bounds() {
        assert!(summary(&"s".repeat(MAX_SUMMARY_CHARS)).is_ok());
        assert!(is_validation(summary(&"s".repeat(MAX_SUMMARY_CHARS + 1))));
        assert!(is_validation(summary("")));
    }

    #[test]
    fn test_work_experience_dates() {
        let mut fields = sample_work_experience();
        assert!(work_experience(&fields).is_ok());

        fields.end_date = Some(Utc.with_ymd_and_hms(2022, 6, 30, 0, 0, 0).unwrap());
        assert!(work_experience(&fields).is_ok());

        fields.end_date = Some(Utc.with_ymd_and_hms(2019, 12, 31, 0, 0, 0).unwrap());
        assert!(is_validation(work_experience(&fields)));
    }

    #[test]
    fn test_work_experience_requires_company() {
        let mut fields = sample_work_experience();
        fields.company = " ".to_string();
        assert!(is_validation(work_experience(&fields)));
    }
}
