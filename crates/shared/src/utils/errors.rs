use anyhow::Error as AnyhowError;
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] SqlxError),

    #[error("Hashing error: {0}")]
    HashingError(#[from] BcryptError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpiredError,

    #[error("Token validation error")]
    TokenValidationError,

    #[error("Token generation error: {0}")]
    TokenGenerationError(#[from] JwtError),

    #[error("Bcrypt error: {0}")]
    BcryptError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<AnyhowError> for AppError {
    fn from(err: AnyhowError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

/// Picks a single human readable message out of a validation failure.
///
/// Fields are visited in name order so the same input always yields the same
/// message.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().collect();
    fields.sort();

    fields
        .into_iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}
