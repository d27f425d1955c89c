use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub password2: String,
}

impl ChangePasswordRequest {
    pub const MIN_LENGTH: usize = 8;

    /// Checks are ordered so the admin sees the most basic problem first.
    pub fn check(&self) -> Result<(), AppError> {
        if self.password.is_empty() || self.password2.is_empty() {
            return Err(AppError::InvalidInput("Enter new password".to_string()));
        }

        if self.password.chars().count() < Self::MIN_LENGTH {
            return Err(AppError::InvalidInput(
                "Password should be at least 8 characters long".to_string(),
            ));
        }

        if self.password != self.password2 {
            return Err(AppError::InvalidInput("Passwords do not match".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, password2: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            password: password.to_string(),
            password2: password2.to_string(),
        }
    }

    fn message(req: ChangePasswordRequest) -> String {
        match req.check() {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn blank_fields_are_reported_first() {
        assert_eq!(message(request("", "short")), "Enter new password");
        assert_eq!(message(request("longenough", "")), "Enter new password");
    }

    #[test]
    fn length_is_checked_before_match() {
        assert_eq!(
            message(request("short", "other")),
            "Password should be at least 8 characters long"
        );
        assert_eq!(
            message(request("longenough", "longenougX")),
            "Passwords do not match"
        );
    }

    #[test]
    fn matching_long_password_passes() {
        assert!(request("longenough", "longenough").check().is_ok());
    }

    #[test]
    fn login_requires_valid_email() {
        let login = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(login.validate().is_err());
    }
}
