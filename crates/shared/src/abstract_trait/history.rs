use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::request::CreateHistoryRequest,
    model::{history::History, status::TransactionStatus},
    utils::AppError,
};

pub type DynHistoryRepository = Arc<dyn HistoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait HistoryRepositoryTrait {
    async fn create(&self, input: &CreateHistoryRequest) -> Result<History, AppError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<History>, AppError>;
    /// Returns the number of ledger rows touched.
    async fn update_status_by_reference(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<u64, AppError>;
}
