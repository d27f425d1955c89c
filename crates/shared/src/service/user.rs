use crate::{
    abstract_trait::{DynHistoryRepository, DynUserRepository, UserServiceTrait},
    domain::{
        request::{
            AdjustBalanceRequest, CreateHistoryRequest, EditUserForm, UpdateUserRequest,
            parse_amount,
        },
        response::{
            ApiResponse, ErrorResponse,
            history::HistoryResponse,
            user::{UserDetailResponse, UserResponse},
        },
    },
    model::{
        history::UserSnapshot,
        status::{HistoryKind, TransactionStatus},
        user::User,
    },
    utils::{AppError, Method, OperationTracer, TracingContext, generate_reference},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use tracing::{error, info};

/// Method recorded on ledger rows written by an admin balance adjustment.
pub const COMPANY_DEPOSIT_METHOD: &str = "Company Deposit";

#[derive(Clone)]
pub struct UserService {
    user_repository: DynUserRepository,
    history_repository: DynHistoryRepository,
    tracer: OperationTracer,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("user_repository", &"DynUserRepository")
            .field("history_repository", &"DynHistoryRepository")
            .finish()
    }
}

impl UserService {
    pub fn new(
        user_repository: DynUserRepository,
        history_repository: DynHistoryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            user_repository,
            history_repository,
            tracer: OperationTracer::register("user_service", registry),
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

    async fn load_user(&self, id: i32) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User with that Id not found".to_string()))
    }

    /// Adds `amount` to the user's balance and writes an approved ledger row.
    async fn adjust_with_history(
        &self,
        operation: &str,
        kind: HistoryKind,
        id: i32,
        input: &AdjustBalanceRequest,
        success_message: &str,
    ) -> Result<ApiResponse<HistoryResponse>, ErrorResponse> {
        let method = Method::Post;

        let tracing_ctx = self.tracer.start_tracing(
            operation,
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user_id", id.to_string()),
                KeyValue::new("history.type", kind.as_str()),
            ],
        );

        let user = match self.load_user(id).await {
            Ok(user) => user,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let amount = match parse_amount(&input.amount) {
            Ok(amount) => amount,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let reference = generate_reference();

        let history = match self
            .history_repository
            .create(&CreateHistoryRequest {
                kind,
                note: None,
                amount,
                reference: reference.clone(),
                user_id: user.user_id,
                user_snapshot: UserSnapshot::from(&user),
                method: COMPANY_DEPOSIT_METHOD.to_string(),
                status: TransactionStatus::Approved,
            })
            .await
        {
            Ok(history) => history,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self
            .user_repository
            .adjust_balance(user.user_id, amount, Decimal::ZERO)
            .await
        {
            Ok(Some(updated)) => {
                info!(
                    "{kind} of {amount} applied to user {id}, balance now {} (reference {reference})",
                    updated.balance
                );
            }
            Ok(None) => {
                return self
                    .fail(
                        &tracing_ctx,
                        method,
                        AppError::NotFound("User with that Id not found".to_string()),
                    )
                    .await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, success_message)
            .await;

        Ok(ApiResponse::success(
            success_message,
            HistoryResponse::from(history),
        ))
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn get_clients(&self) -> Result<ApiResponse<Vec<UserResponse>>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracer
            .start_tracing("GetClients", vec![KeyValue::new("component", "user")]);

        match self.user_repository.find_clients().await {
            Ok(users) => {
                let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Clients retrieved")
                    .await;

                Ok(ApiResponse::success("Clients retrieved successfully", data))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn get_user(&self, id: i32) -> Result<ApiResponse<UserDetailResponse>, ErrorResponse> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user_id", id.to_string()),
            ],
        );

        let user = match self.load_user(id).await {
            Ok(user) => user,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let history = match self.history_repository.find_by_user(id).await {
            Ok(rows) => rows.into_iter().map(HistoryResponse::from).collect(),
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User retrieved")
            .await;

        Ok(ApiResponse::success(
            "User retrieved successfully",
            UserDetailResponse {
                user: UserResponse::from(user),
                history,
            },
        ))
    }

    async fn edit_user(
        &self,
        id: i32,
        input: &EditUserForm,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "EditUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user_id", id.to_string()),
            ],
        );

        let request = match UpdateUserRequest::from_form(id, input) {
            Ok(request) => request,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        match self.user_repository.update_user(&request).await {
            Ok(Some(user)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "User updated")
                    .await;

                Ok(ApiResponse::success(
                    "Client Account updated successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                self.fail(
                    &tracing_ctx,
                    method,
                    AppError::NotFound("User with that Id not found".to_string()),
                )
                .await
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn delete_user(&self, id: i32) -> Result<ApiResponse<()>, ErrorResponse> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteUser",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user_id", id.to_string()),
            ],
        );

        if let Err(err) = self.user_repository.delete_user(id).await {
            return self.fail(&tracing_ctx, method, err).await;
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User deleted")
            .await;

        Ok(ApiResponse::success("Account Deleted Successfully", ()))
    }

    async fn credit_user(
        &self,
        id: i32,
        input: &AdjustBalanceRequest,
    ) -> Result<ApiResponse<HistoryResponse>, ErrorResponse> {
        self.adjust_with_history(
            "CreditUser",
            HistoryKind::Profit,
            id,
            input,
            "User credited successfully",
        )
        .await
    }

    async fn deposit_user(
        &self,
        id: i32,
        input: &AdjustBalanceRequest,
    ) -> Result<ApiResponse<HistoryResponse>, ErrorResponse> {
        self.adjust_with_history(
            "DepositUser",
            HistoryKind::Deposit,
            id,
            input,
            "Account Deposit successfully",
        )
        .await
    }
}
