//! Common validation rules shared across request payloads.

use validator::ValidationError;

/// Validates password strength.
///
/// Requirements:
/// - 8-128 characters in length
/// - No leading or trailing whitespace
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(ValidationError::new("password_invalid_length"));
    }

    if password.trim() != password {
        return Err(ValidationError::new("password_untrimmed"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_rejects_too_short() {
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn password_rejects_untrimmed() {
        assert!(validate_password(" padded-secret ").is_err());
    }

    #[test]
    fn password_accepts_valid() {
        assert!(validate_password("correct-horse-battery").is_ok());
    }
}
