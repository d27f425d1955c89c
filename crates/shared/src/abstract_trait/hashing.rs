use async_trait::async_trait;
use std::sync::Arc;

use crate::utils::AppError;

pub type DynHashing = Arc<dyn HashingTrait + Send + Sync>;

/// Password hashing used for admin logins and password changes.
#[async_trait]
pub trait HashingTrait: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AppError>;
    /// `Err(AppError::InvalidCredentials)` when the password does not match.
    async fn compare_password(&self, hashed_password: &str, password: &str)
    -> Result<(), AppError>;
}
