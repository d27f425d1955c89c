use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    request::{ChangePasswordRequest, LoginRequest},
    response::{ApiResponse, ErrorResponse, user::UserResponse},
};

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn login_admin(&self, input: &LoginRequest) -> Result<ApiResponse<String>, ErrorResponse>;
    async fn session_admin(&self, token: &str) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
    async fn change_password(
        &self,
        user_id: i32,
        input: &ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, ErrorResponse>;
    /// Creates an administrator with this email unless an account already uses it.
    async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
}
