use crate::utils::AppError;
use core::fmt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod dashboard;
pub mod deposit;
pub mod history;
pub mod site;
pub mod user;
pub mod withdraw;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}

impl<T: std::fmt::Debug> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ApiResponse {{ status: {}, message: {}, data: {:?} }}",
            self.status, self.message, self.data
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let (status, message) = match error {
            AppError::SqlxError(_) => ("error".to_string(), "Database error occurred".to_string()),
            AppError::HashingError(_) => (
                "error".to_string(),
                "Error during password hashing".to_string(),
            ),
            AppError::NotFound(ref msg) => ("error".to_string(), msg.clone()),
            AppError::Forbidden(ref msg) => ("fail".to_string(), msg.clone()),
            AppError::TokenExpiredError => ("fail".to_string(), "Session has expired".to_string()),
            AppError::TokenValidationError => {
                ("fail".to_string(), "Session validation failed".to_string())
            }
            AppError::TokenGenerationError(_) => {
                ("error".to_string(), "Session creation failed".to_string())
            }
            AppError::BcryptError(_) => (
                "error".to_string(),
                "Error during password verification".to_string(),
            ),
            AppError::InvalidCredentials => {
                ("fail".to_string(), "Invalid email or password".to_string())
            }
            AppError::ValidationError(ref errors) => (
                "fail".to_string(),
                crate::utils::first_validation_message(errors),
            ),
            AppError::InvalidInput(ref msg) => ("fail".to_string(), msg.clone()),
            AppError::AlreadyProcessed(ref msg) => ("fail".to_string(), msg.clone()),
            AppError::SerializationError(_) => {
                ("error".to_string(), "Internal server error".to_string())
            }
            AppError::InternalError(_) => {
                ("error".to_string(), "Internal server error".to_string())
            }
        };
        ErrorResponse { status, message }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status: {}, Message: {}", self.status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_details_are_not_leaked() {
        let response = ErrorResponse::from(AppError::SqlxError(sqlx::Error::RowNotFound));
        assert_eq!(response.status, "error");
        assert_eq!(response.message, "Database error occurred");
    }

    #[test]
    fn user_facing_messages_pass_through() {
        let response = ErrorResponse::from(AppError::NotFound(
            "User with that Id not found".to_string(),
        ));
        assert_eq!(response.message, "User with that Id not found");

        let response = ErrorResponse::from(AppError::AlreadyProcessed(
            "Deposit abc was already approved".to_string(),
        ));
        assert_eq!(response.status, "fail");
    }
}
