//! Auth requests
//!
//! Payloads for the register, login and API key endpoints, with the
//! client-side checks run before anything is sent.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{catalog::CatalogError, session::Secret};

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const STUDENT_EMAIL_PATTERN: &str = r"^[^\s@]+@stud\.noroff\.no$";
const NAME_PATTERN: &str = r"^[A-Za-z0-9_]+$";

/// Client-side validation failures, worded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name left blank
    #[error("Please enter your name.")]
    MissingName,

    /// Name contains punctuation
    #[error("Name can only contain letters, numbers, and underscores. No punctuation allowed.")]
    InvalidName,

    /// Email left blank
    #[error("Please enter your email address.")]
    MissingEmail,

    /// Email is not shaped like an address
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    /// Email is outside the student domain
    #[error("Email must be a valid @stud.noroff.no address.")]
    InvalidStudentEmail,

    /// Password left blank
    #[error("Please enter your password.")]
    MissingPassword,

    /// Password shorter than [`MIN_PASSWORD_LENGTH`]
    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,
}

fn matches(pattern: &str, value: &str) -> bool {
    Regex::new(pattern).is_ok_and(|regex| regex.is_match(value))
}

fn validate_password(password: &Secret) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }

    if password.expose().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Email address, trimmed
    pub email: String,

    /// Password
    pub password: Secret,
}

impl LoginRequest {
    /// Build a login request; the email is trimmed.
    pub fn new(email: &str, password: Secret) -> Self {
        Self {
            email: email.trim().to_string(),
            password,
        }
    }

    /// Check the fields before sending.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        if !matches(EMAIL_PATTERN, &self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        validate_password(&self.password)
    }
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// User name, letters, digits and underscores only
    pub name: String,

    /// Student email address
    pub email: String,

    /// Password
    pub password: Secret,
}

impl Registration {
    /// Build a registration; name and email are trimmed.
    pub fn new(name: &str, email: &str, password: Secret) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        }
    }

    /// Check the fields before sending.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        if !matches(NAME_PATTERN, &self.name) {
            return Err(ValidationError::InvalidName);
        }

        if self.email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        if !matches(STUDENT_EMAIL_PATTERN, &self.email) {
            return Err(ValidationError::InvalidStudentEmail);
        }

        validate_password(&self.password)
    }
}

/// Issued API key.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKey {
    /// Key label
    #[serde(default)]
    pub name: String,

    /// Key status
    #[serde(default)]
    pub status: String,

    /// The key itself
    pub key: Secret,
}

/// Message shown when login fails.
pub fn login_failure_message(error: &CatalogError) -> String {
    match error {
        CatalogError::Status { status: 401, .. } => {
            "Invalid email or password. Please check your credentials.".to_string()
        }
        CatalogError::Status { status: 429, .. } => {
            "Too many requests. Please try again later.".to_string()
        }
        CatalogError::Status { message, .. } => message.clone(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

/// Message shown when registration fails.
///
/// Field-level errors reported by the API take precedence and are joined.
pub fn registration_failure_message(error: &CatalogError) -> String {
    match error {
        CatalogError::Status { errors, .. } if !errors.is_empty() => errors.join(", "),
        CatalogError::Status { status: 409, .. } => {
            "This email or username is already registered.".to_string()
        }
        CatalogError::Status { status: 429, .. } => {
            "Too many requests. Please try again later.".to_string()
        }
        CatalogError::Status { message, .. } => message.clone(),
        _ => "Registration failed. Please try again.".to_string(),
    }
}
