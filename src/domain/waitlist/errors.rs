//! Waitlist-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors surfaced by the waitlist operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitlistError {
    /// Malformed, missing or out-of-range input.
    ValidationFailed { field: String, message: String },
    /// A concurrent first-time signup already claimed this email.
    DuplicateEmail,
    /// Step 2 was attempted without a step-1 record.
    PrecursorMissing,
    /// The requested signup does not exist.
    NotFound,
    /// Any other failure of the persistence gateway.
    Persistence(String),
}

impl WaitlistError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        WaitlistError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        WaitlistError::Persistence(message.into())
    }
    pub fn message(&self) -> String {
        match self {
            WaitlistError::ValidationFailed { message, .. } => message.clone(),
            WaitlistError::DuplicateEmail => "This email is already registered".to_string(),
            WaitlistError::PrecursorMissing => "Please complete step 1 first".to_string(),
            WaitlistError::NotFound => "Signup not found".to_string(),
            WaitlistError::Persistence(msg) => format!("Persistence failure: {}", msg),
        }
    }
}

impl std::fmt::Display for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WaitlistError {}

impl From<DomainError> for WaitlistError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateEmail => WaitlistError::DuplicateEmail,
            ErrorCode::SignupNotFound => WaitlistError::NotFound,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                WaitlistError::Persistence(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for WaitlistError {
    fn from(err: ValidationError) -> Self {
        WaitlistError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
