use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::response::{ApiResponse, ErrorResponse, deposit::DepositResponse},
    model::{deposit::Deposit, status::TransactionStatus},
    utils::AppError,
};

pub type DynDepositRepository = Arc<dyn DepositRepositoryTrait + Send + Sync>;
pub type DynDepositService = Arc<dyn DepositServiceTrait + Send + Sync>;

#[async_trait]
pub trait DepositRepositoryTrait {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Deposit>, AppError>;
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Deposit>, AppError>;
    /// Moves the record from `from` to `to`. Returns `None` when the record is
    /// no longer in `from`.
    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Deposit>, AppError>;
}

#[async_trait]
pub trait DepositServiceTrait {
    async fn get_pending_deposits(&self)
    -> Result<ApiResponse<Vec<DepositResponse>>, ErrorResponse>;
    async fn approve_deposit(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<DepositResponse>, ErrorResponse>;
    async fn reject_deposit(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<DepositResponse>, ErrorResponse>;
}
