use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{
    domain::{
        request::{AdjustBalanceRequest, CreateUserRequest, EditUserForm, UpdateUserRequest},
        response::{
            ApiResponse, ErrorResponse,
            history::HistoryResponse,
            user::{UserDetailResponse, UserResponse},
        },
    },
    model::user::User,
    utils::AppError,
};

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;
pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserRepositoryTrait {
    async fn find_clients(&self) -> Result<Vec<User>, AppError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create_user(&self, input: &CreateUserRequest) -> Result<User, AppError>;
    async fn update_user(&self, input: &UpdateUserRequest) -> Result<Option<User>, AppError>;
    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AppError>;
    /// Adds the deltas to the stored figures in a single statement.
    async fn adjust_balance(
        &self,
        id: i32,
        balance_delta: Decimal,
        invested_delta: Decimal,
    ) -> Result<Option<User>, AppError>;
    async fn delete_user(&self, id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserServiceTrait {
    async fn get_clients(&self) -> Result<ApiResponse<Vec<UserResponse>>, ErrorResponse>;
    async fn get_user(&self, id: i32) -> Result<ApiResponse<UserDetailResponse>, ErrorResponse>;
    async fn edit_user(
        &self,
        id: i32,
        input: &EditUserForm,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse>;
    async fn delete_user(&self, id: i32) -> Result<ApiResponse<()>, ErrorResponse>;
    async fn credit_user(
        &self,
        id: i32,
        input: &AdjustBalanceRequest,
    ) -> Result<ApiResponse<HistoryResponse>, ErrorResponse>;
    async fn deposit_user(
        &self,
        id: i32,
        input: &AdjustBalanceRequest,
    ) -> Result<ApiResponse<HistoryResponse>, ErrorResponse>;
}
