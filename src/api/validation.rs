use std::str::FromStr;

use super::ApiError;
use crate::db::CaseStatus;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_PHONE_LEN: usize = 20;

pub fn validate_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Name cannot be empty"));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "Name must be {MAX_NAME_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(ApiError::validation("A valid email address is required"));
    }
    if trimmed.len() > 120 {
        return Err(ApiError::validation(
            "Email must be 120 characters or less",
        ));
    }
    Ok(trimmed)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    Ok(password)
}

pub fn validate_phone(phone: &str) -> Result<&str, ApiError> {
    let trimmed = phone.trim();
    if trimmed.len() > MAX_PHONE_LEN {
        return Err(ApiError::validation(format!(
            "Phone number must be {MAX_PHONE_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_case_number(case_number: &str) -> Result<&str, ApiError> {
    let trimmed = case_number.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Case number cannot be empty"));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "Case number must be {MAX_NAME_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_status(status: &str) -> Result<CaseStatus, ApiError> {
    CaseStatus::from_str(status).map_err(ApiError::validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Asha Rao").is_ok());
        assert_eq!(validate_name("  trimmed  ").unwrap(), "trimmed");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("adv@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_case_number() {
        assert!(validate_case_number("CS-101/2026").is_ok());
        assert!(validate_case_number("").is_err());
        assert!(validate_case_number("  ").is_err());
    }

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("Active").unwrap(), CaseStatus::Active);
        assert_eq!(validate_status("Closed").unwrap(), CaseStatus::Closed);
        assert!(validate_status("Archived").is_err());
    }
}
