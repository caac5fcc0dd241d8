//! Synchronous form checks that run before any network call.

use catalog_api::{LoginRequest, PasswordChange, RegisterRequest};
use thiserror::Error;

use crate::config::AuthConfig;

/// Form input rejected before reaching the auth collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("new passwords do not match")]
    PasswordsMismatch,
    #[error("current password is required")]
    CurrentPasswordRequired,
}

impl ValidationError {
    /// User-facing text from configuration. `{min}` in a length message is replaced with the
    /// enforced minimum.
    pub fn message(&self, config: &AuthConfig) -> String {
        match self {
            Self::InvalidEmail => config.invalid_email.clone(),
            Self::PasswordTooShort { min } => fill_min(&config.password_too_short, *min),
            Self::NameTooShort { min } => fill_min(&config.name_too_short, *min),
            Self::PasswordsMismatch => config.passwords_mismatch.clone(),
            Self::CurrentPasswordRequired => config.current_password_required.clone(),
        }
    }
}

fn fill_min(template: &str, min: usize) -> String {
    template.replace("{min}", &min.to_string())
}

fn check_credentials(email: &str, password: &str, config: &AuthConfig) -> Result<(), ValidationError> {
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < config.min_password_len {
        return Err(ValidationError::PasswordTooShort {
            min: config.min_password_len,
        });
    }
    Ok(())
}

/// Checks sign-in input and builds the request.
///
/// # Errors
///
/// Returns the first failing rule: email without `@`, then a short password.
pub fn validate_login(
    email: &str,
    password: &str,
    config: &AuthConfig,
) -> Result<LoginRequest, ValidationError> {
    check_credentials(email, password, config)?;
    Ok(LoginRequest::new(email, password))
}

/// Checks registration input and builds the request.
///
/// # Errors
///
/// Returns the first failing rule: the login rules, then a short name.
pub fn validate_register(
    email: &str,
    password: &str,
    name: &str,
    config: &AuthConfig,
) -> Result<RegisterRequest, ValidationError> {
    check_credentials(email, password, config)?;
    if name.chars().count() < config.min_name_len {
        return Err(ValidationError::NameTooShort {
            min: config.min_name_len,
        });
    }
    Ok(RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        name: Some(name.to_string()),
    })
}

/// Checks the password-change form.
///
/// Returns `Ok(None)` when no new password was entered, which means there is nothing to do.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordsMismatch`] before
/// [`ValidationError::CurrentPasswordRequired`].
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<Option<PasswordChange>, ValidationError> {
    if new.is_empty() {
        return Ok(None);
    }
    if new != confirm {
        return Err(ValidationError::PasswordsMismatch);
    }
    if current.is_empty() {
        return Err(ValidationError::CurrentPasswordRequired);
    }
    Ok(Some(PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    }))
}

/// Maps a registration failure message to the text shown on the form.
pub fn registration_error_message(message: &str, config: &AuthConfig) -> String {
    if message.contains("already registered") || message.contains("already in use") {
        config.email_exists.clone()
    } else {
        config.registration_failed.clone()
    }
}
