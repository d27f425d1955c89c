use std::sync::Arc;

use crate::utils::AppError;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

/// Issues and checks the session token stored in the admin cookie.
pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, user_id: i64) -> Result<String, AppError>;
    /// Returns the user id carried by a valid, unexpired token.
    fn verify_token(&self, token: &str) -> Result<i64, AppError>;
}
