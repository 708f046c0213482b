use garde::Validate;

use crate::error::{AppError, Result};
use crate::services::auth::{Credentials, Registration};

/// Validates a registration payload.
///
/// # Arguments
///
/// * `registration` - The name, email and password submitted.
///
/// # Returns
///
/// A `Result<()>` indicating whether the payload is acceptable.
pub fn validate_registration(registration: &Registration) -> Result<()> {
    registration
        .validate()
        .map_err(|report| AppError::Validation(report.to_string()))?;

    if registration.name.trim().is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates a login payload. Only presence is checked; anything else is a credential failure.
pub fn validate_credentials(credentials: &Credentials) -> Result<()> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, password: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_registration(&registration("Ana", "ana@example.com", "secret1")).is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        let err = validate_registration(&registration("Ana", "not-an-email", "secret1"));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_registration(&registration("Ana", "ana@example.com", "12345"));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_blank_name() {
        let err = validate_registration(&registration("   ", "ana@example.com", "secret1"));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn login_requires_both_fields() {
        let missing = Credentials { email: "a@example.com".into(), password: String::new() };
        assert!(validate_credentials(&missing).is_err());
    }
}
