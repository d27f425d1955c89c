use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::response::{ApiResponse, ErrorResponse, withdraw::WithdrawResponse},
    model::{status::TransactionStatus, withdraw::Withdraw},
    utils::AppError,
};

pub type DynWithdrawRepository = Arc<dyn WithdrawRepositoryTrait + Send + Sync>;
pub type DynWithdrawService = Arc<dyn WithdrawServiceTrait + Send + Sync>;

#[async_trait]
pub trait WithdrawRepositoryTrait {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Withdraw>, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Withdraw>, AppError>;
    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Withdraw>, AppError>;
}

#[async_trait]
pub trait WithdrawServiceTrait {
    async fn get_pending_withdrawals(
        &self,
    ) -> Result<ApiResponse<Vec<WithdrawResponse>>, ErrorResponse>;
    async fn approve_withdrawal(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<WithdrawResponse>, ErrorResponse>;
    async fn reject_withdrawal(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<WithdrawResponse>, ErrorResponse>;
}
