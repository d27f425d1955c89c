use crate::{
    abstract_trait::{
        DepositServiceTrait, DynDepositRepository, DynHistoryRepository, DynUserRepository,
    },
    domain::response::{ApiResponse, ErrorResponse, deposit::DepositResponse},
    model::{deposit::Deposit, status::TransactionStatus},
    utils::{AppError, Method, OperationTracer, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct DepositService {
    deposit_repository: DynDepositRepository,
    history_repository: DynHistoryRepository,
    user_repository: DynUserRepository,
    tracer: OperationTracer,
}

impl std::fmt::Debug for DepositService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepositService")
            .field("deposit_repository", &"DynDepositRepository")
            .field("history_repository", &"DynHistoryRepository")
            .field("user_repository", &"DynUserRepository")
            .finish()
    }
}

impl DepositService {
    pub fn new(
        deposit_repository: DynDepositRepository,
        history_repository: DynHistoryRepository,
        user_repository: DynUserRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            deposit_repository,
            history_repository,
            user_repository,
            tracer: OperationTracer::register("deposit_service", registry),
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

    async fn load_pending(&self, reference: &str) -> Result<Deposit, AppError> {
        let deposit = self
            .deposit_repository
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Deposit with reference {reference} not found"))
            })?;

        if deposit.status != TransactionStatus::Pending.as_str() {
            return Err(AppError::AlreadyProcessed(format!(
                "Deposit {reference} was already {}",
                deposit.status
            )));
        }

        Ok(deposit)
    }

    /// Moves the deposit out of `pending` and mirrors the new status onto its
    /// ledger entry.
    async fn settle(&self, reference: &str, to: TransactionStatus) -> Result<Deposit, AppError> {
        let deposit = self
            .deposit_repository
            .transition_status(reference, TransactionStatus::Pending, to)
            .await?
            .ok_or_else(|| {
                AppError::AlreadyProcessed(format!(
                    "Deposit {reference} was processed by another request"
                ))
            })?;

        let touched = self
            .history_repository
            .update_status_by_reference(reference, to)
            .await?;

        if touched == 0 {
            warn!("Deposit {reference} has no ledger entry to mark {to}");
        }

        Ok(deposit)
    }
}

#[async_trait]
impl DepositServiceTrait for DepositService {
    async fn get_pending_deposits(
        &self,
    ) -> Result<ApiResponse<Vec<DepositResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetPendingDeposits",
            vec![KeyValue::new("component", "deposit")],
        );

        match self
            .deposit_repository
            .find_by_status(TransactionStatus::Pending)
            .await
        {
            Ok(rows) => {
                let data: Vec<DepositResponse> =
                    rows.into_iter().map(DepositResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Pending deposits retrieved")
                    .await;

                Ok(ApiResponse::success(
                    "Pending deposits retrieved successfully",
                    data,
                ))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn approve_deposit(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<DepositResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "ApproveDeposit",
            vec![
                KeyValue::new("component", "deposit"),
                KeyValue::new("reference", reference.to_string()),
            ],
        );

        let pending = match self.load_pending(reference).await {
            Ok(deposit) => deposit,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self.user_repository.find_by_id(pending.user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let err = AppError::NotFound(format!(
                    "Owner {} of deposit {reference} not found",
                    pending.user_id
                ));
                return self.fail(&tracing_ctx, method, err).await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        let deposit = match self.settle(reference, TransactionStatus::Approved).await {
            Ok(deposit) => deposit,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self
            .user_repository
            .adjust_balance(deposit.user_id, deposit.amount, deposit.amount)
            .await
        {
            Ok(Some(user)) => info!(
                "Deposit {reference} credited {} to user {}, balance now {}",
                deposit.amount, user.user_id, user.balance
            ),
            Ok(None) => {
                let err = AppError::NotFound(format!(
                    "Owner {} of deposit {reference} disappeared before crediting",
                    deposit.user_id
                ));
                return self.fail(&tracing_ctx, method, err).await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Deposit approved")
            .await;

        Ok(ApiResponse::success(
            "Deposit Approved",
            DepositResponse::from(deposit),
        ))
    }

    async fn reject_deposit(
        &self,
        reference: &str,
    ) -> Result<ApiResponse<DepositResponse>, ErrorResponse> {
        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "RejectDeposit",
            vec![
                KeyValue::new("component", "deposit"),
                KeyValue::new("reference", reference.to_string()),
            ],
        );

        if let Err(err) = self.load_pending(reference).await {
            return self.fail(&tracing_ctx, method, err).await;
        }

        let deposit = match self.settle(reference, TransactionStatus::Rejected).await {
            Ok(deposit) => deposit,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Deposit rejected")
            .await;

        Ok(ApiResponse::success(
            "Deposit Rejected",
            DepositResponse::from(deposit),
        ))
    }
}
