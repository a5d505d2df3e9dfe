//! Registration validation rules
//!
//! Every field is checked and all violations are collected. Within a field
//! the syntactic rules stop at the first failure; the uniqueness lookups run
//! whenever the value is non-empty.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use validator::ValidateEmail;

use super::repository::UserRepository;
use super::request::{RegistrationField, RegistrationRequest};
use crate::domain::DomainError;

/// A single rule failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationViolation {
    #[error("{0} is required")]
    Required(RegistrationField),

    #[error("Minimum length is {0}")]
    TooShort(usize),

    #[error("Maximum length is {0}")]
    TooLong(usize),

    #[error("Email is invalid")]
    InvalidEmail,

    #[error("This user name already exists")]
    UserNameTaken,

    #[error("This email already exists")]
    EmailTaken,

    #[error(
        "Password must be 8 to 24 characters long and contain at least one number, one lowercase letter and one uppercase letter"
    )]
    WeakPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_USER_NAME_LENGTH: usize = 3;
pub const MAX_USER_NAME_LENGTH: usize = 15;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 24;

// Equivalent to ^(?=.*\d)(?=.*[a-z])(?=.*[A-Z]).{8,24}$ split into
// lookahead-free parts.
static PASSWORD_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^.{{{},{}}}$",
        MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
    ))
    .unwrap()
});
static PASSWORD_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static PASSWORD_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static PASSWORD_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

/// A rule failure scoped to a request field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: RegistrationField,
    pub violation: RegistrationViolation,
}

impl Violation {
    pub fn new(field: RegistrationField, violation: RegistrationViolation) -> Self {
        Self { field, violation }
    }
}

/// Wire shape of a violation: `{"field": "userName", "message": "..."}`
impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Violation", 2)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("message", &self.violation.to_string())?;
        state.end()
    }
}

/// The violations collected for one request; empty means valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: RegistrationField, violation: RegistrationViolation) {
        self.0.push(Violation::new(field, violation));
    }

    /// Record the outcome of a syntactic rule
    fn check(&mut self, field: RegistrationField, result: Result<(), RegistrationViolation>) {
        if let Err(violation) = result {
            self.push(field, violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Violations recorded against one field
    pub fn for_field(&self, field: RegistrationField) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.field == field)
    }

    pub fn has_violation_for(&self, field: RegistrationField) -> bool {
        self.for_field(field).next().is_some()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field.as_str(), v.violation))
            .collect();

        write!(f, "{}", parts.join("; "))
    }
}

fn validate_length(value: &str, min: usize, max: usize) -> Result<(), RegistrationViolation> {
    let len = value.chars().count();

    if len < min {
        return Err(RegistrationViolation::TooShort(min));
    }

    if len > max {
        return Err(RegistrationViolation::TooLong(max));
    }

    Ok(())
}

fn validate_required(field: RegistrationField, value: &str) -> Result<(), RegistrationViolation> {
    if value.trim().is_empty() {
        return Err(RegistrationViolation::Required(field));
    }
    Ok(())
}

/// Validate a first name
///
/// Rules:
/// - Cannot be empty
/// - 2 to 50 characters
pub fn validate_first_name(value: &str) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::FirstName, value)?;
    validate_length(value, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
}

/// Validate a last name
///
/// Rules:
/// - Cannot be empty
/// - 2 to 50 characters
pub fn validate_last_name(value: &str) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::LastName, value)?;
    validate_length(value, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
}

/// Validate the shape of a user name (uniqueness is checked separately)
///
/// Rules:
/// - Cannot be empty
/// - 3 to 15 characters
pub fn validate_user_name(value: &str) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::UserName, value)?;
    validate_length(value, MIN_USER_NAME_LENGTH, MAX_USER_NAME_LENGTH)
}

/// Validate the syntax of an email (uniqueness is checked separately)
pub fn validate_email(value: &str) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::Email, value)?;

    if !value.validate_email() {
        return Err(RegistrationViolation::InvalidEmail);
    }

    Ok(())
}

/// Validate a password against the policy
///
/// Rules:
/// - Cannot be empty
/// - 8 to 24 characters, no line breaks
/// - At least one digit, one lowercase and one uppercase letter
pub fn validate_password(value: &str) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::Password, value)?;

    let satisfied = PASSWORD_SHAPE.is_match(value)
        && PASSWORD_DIGIT.is_match(value)
        && PASSWORD_LOWER.is_match(value)
        && PASSWORD_UPPER.is_match(value);

    if !satisfied {
        return Err(RegistrationViolation::WeakPassword);
    }

    Ok(())
}

/// Validate that the confirmation repeats the password exactly
pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), RegistrationViolation> {
    validate_required(RegistrationField::ConfirmPassword, confirmation)?;

    if password != confirmation {
        return Err(RegistrationViolation::PasswordMismatch);
    }

    Ok(())
}

/// Evaluates every registration rule, including the uniqueness lookups
#[derive(Debug)]
pub struct RegistrationValidator<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for RegistrationValidator<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> RegistrationValidator<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Collect every violation for the request
    ///
    /// Storage failures during the uniqueness lookups are returned as
    /// errors rather than violations.
    pub async fn validate(
        &self,
        request: &RegistrationRequest,
    ) -> Result<ValidationErrors, DomainError> {
        let mut errors = ValidationErrors::new();

        errors.check(
            RegistrationField::FirstName,
            validate_first_name(&request.first_name),
        );
        errors.check(
            RegistrationField::LastName,
            validate_last_name(&request.last_name),
        );
        errors.check(
            RegistrationField::UserName,
            validate_user_name(&request.user_name),
        );

        let (user_name_taken, email_taken) = tokio::try_join!(
            self.user_name_taken(&request.user_name),
            self.email_taken(&request.email),
        )?;

        if user_name_taken {
            errors.push(
                RegistrationField::UserName,
                RegistrationViolation::UserNameTaken,
            );
        }

        errors.check(RegistrationField::Email, validate_email(&request.email));

        if email_taken {
            errors.push(RegistrationField::Email, RegistrationViolation::EmailTaken);
        }

        errors.check(
            RegistrationField::Password,
            validate_password(&request.password),
        );
        errors.check(
            RegistrationField::ConfirmPassword,
            validate_password_confirmation(&request.password, &request.confirm_password),
        );

        Ok(errors)
    }

    async fn user_name_taken(&self, user_name: &str) -> Result<bool, DomainError> {
        if user_name.is_empty() {
            return Ok(false);
        }
        self.repository.user_name_exists(user_name).await
    }

    async fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        if email.is_empty() {
            return Ok(false);
        }
        self.repository.email_exists(email).await
    }
}
