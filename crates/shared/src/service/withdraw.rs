use crate::{
    abstract_trait::{
        DynHistoryRepository, DynUserRepository, DynWithdrawRepository, WithdrawServiceTrait,
    },
    domain::response::{ApiResponse, ErrorResponse, withdraw::WithdrawResponse},
    model::{status::TransactionStatus, withdraw::Withdraw},
    utils::{AppError, Method, OperationTracer, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct WithdrawService {
    withdraw_repository: DynWithdrawRepository,
    history_repository: DynHistoryRepository,
    user_repository: DynUserRepository,
    tracer: OperationTracer,
}

impl std::fmt::Debug for WithdrawService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithdrawService")
            .field("withdraw_repository", &"DynWithdrawRepository")
            .field("history_repository", &"DynHistoryRepository")
            .field("user_repository", &"DynUserRepository")
            .finish()
    }
}

impl WithdrawService {
    pub fn new(
        withdraw_repository: DynWithdrawRepository,
        history_repository: DynHistoryRepository,
        user_repository: DynUserRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            withdraw_repository,
            history_repository,
            user_repository,
            tracer: OperationTracer::register("withdraw_service", registry),
        }
    }

    async fn fail<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        err: AppError,
    ) -> Result<T, ErrorResponse> {
        let msg = err.to_string();
        error!("{msg}");
        self.tracer
            .complete_tracing_error(tracing_ctx, method, &msg)
            .await;
        Err(ErrorResponse::from(err))
    }

    async fn ensure_pending(&self, reference: &str) -> Result<Withdraw, AppError> {
        let withdraw = self
            .withdraw_repository
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Withdrawal with reference {reference} not found"))
            })?;

        if withdraw.status != TransactionStatus::Pending.as_str() {
            return Err(AppError::AlreadyProcessed(format!(
                "Withdrawal {reference} was already {}",
                withdraw.status
            )));
        }

        Ok(withdraw)
    }

    async fn settle(&self, reference: &str, to: TransactionStatus) -> Result<Withdraw, AppError> {
        let withdraw = self
            .withdraw_repository
            .transition_status(reference, TransactionStatus::Pending, to)
            .await?
            .ok_or_else(|| {
                AppError::AlreadyProcessed(format!(
                    "Withdrawal {reference} was processed by another request"
                ))
            })?;

        let touched = self
            .history_repository
            .update_status_by_reference(reference, to)
            .await?;

        if touched == 0 {
            warn!("Withdrawal {reference} has no ledger entry to mark {to}");
        }

        Ok(withdraw)
    }
}

#[async_trait]
impl WithdrawServiceTrait for WithdrawService {
    async fn get_pending_withdrawals(
        &self,
    ) -> Result<ApiResponse<Vec<WithdrawResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetPendingWithdrawals",
            vec![KeyValue::new("component", "withdraw")],
        );

        match self
            .withdraw_repository
            .find_by_status(TransactionStatus::Pending)
            .await
        {
            Ok(rows) => {
                let data: Vec<WithdrawResponse> =
                    rows.into_iter().map(WithdrawResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Pending withdrawals retrieved")
                    .await;

                Ok(ApiResponse::success(
                    "Pending withdrawals retrieved successfully",
                    data,
                ))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn approve_withdrawal(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<WithdrawResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "ApproveWithdrawal",
            vec![
                KeyValue::new("component", "withdraw"),
                KeyValue::new("reference", reference.to_string()),
            ],
        );

        if let Err(err) = self.ensure_pending(reference).await {
            return self.fail(&tracing_ctx, method, err).await;
        }

        // Funds were reserved when the withdrawal was requested.
        let withdraw = match self.settle(reference, TransactionStatus::Approved).await {
            Ok(withdraw) => withdraw,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Withdrawal approved")
            .await;

        Ok(ApiResponse::success(
            "Withdrawal Approved",
            WithdrawResponse::from(withdraw),
        ))
    }

    async fn reject_withdrawal(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<WithdrawResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "RejectWithdrawal",
            vec![
                KeyValue::new("component", "withdraw"),
                KeyValue::new("reference", reference.to_string()),
            ],
        );

        let pending = match self.ensure_pending(reference).await {
            Ok(pending) => pending,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self.user_repository.find_by_id(pending.user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let err = AppError::NotFound(format!(
                    "Owner {} of withdrawal {reference} not found for refund",
                    pending.user_id
                ));
                return self.fail(&tracing_ctx, method, err).await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        let withdraw = match self.settle(reference, TransactionStatus::Rejected).await {
            Ok(withdraw) => withdraw,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self
            .user_repository
            .adjust_balance(withdraw.user_id, withdraw.amount, Decimal::ZERO)
            .await
        {
            Ok(Some(user)) => info!(
                "Withdrawal {reference} refunded {} to user {}, balance now {}",
                withdraw.amount, user.user_id, user.balance
            ),
            Ok(None) => {
                let err = AppError::NotFound(format!(
                    "Owner {} of withdrawal {reference} not found for refund",
                    withdraw.user_id
                ));
                return self.fail(&tracing_ctx, method, err).await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Withdrawal rejected")
            .await;

        Ok(ApiResponse::success(
            "Withdrawal Rejected",
            WithdrawResponse::from(withdraw),
        ))
    }
}
