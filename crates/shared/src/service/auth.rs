use crate::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynJwtService, DynUserRepository},
    domain::{
        request::{ChangePasswordRequest, CreateUserRequest, LoginRequest},
        response::{ApiResponse, ErrorResponse, user::UserResponse},
    },
    model::user::User,
    utils::{AppError, Method, OperationTracer, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Clone)]
pub struct AuthService {
    repository: DynUserRepository,
    hashing: DynHashing,
    jwt_config: DynJwtService,
    tracer: OperationTracer,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("repository", &"DynUserRepository")
            .field("hashing", &"Hashing")
            .field("jwt_config", &"JwtConfig")
            .finish()
    }
}

/// Only enabled administrators may hold a back-office session.
fn is_active_admin(user: &User) -> bool {
    user.is_admin && !user.disabled
}

impl AuthService {
    pub fn new(
        repository: DynUserRepository,
        hashing: DynHashing,
        jwt_config: DynJwtService,
        registry: &mut Registry,
    ) -> Self {
        Self {
            repository,
            hashing,
            jwt_config,
            tracer: OperationTracer::register("auth_service", registry),
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
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login_admin(&self, input: &LoginRequest) -> Result<ApiResponse<String>, ErrorResponse> {
        let method = Method::Post;

        let tracing_ctx = self.tracer.start_tracing(
            "LoginAdmin",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", input.email.clone()),
            ],
        );

        if let Err(errors) = input.validate() {
            return self
                .fail(&tracing_ctx, method, AppError::ValidationError(errors))
                .await;
        }

        let user = match self.repository.find_by_email(&input.email).await {
            Ok(Some(user)) if is_active_admin(&user) => user,
            Ok(Some(_)) => {
                warn!("Login refused for non-admin or disabled account {}", input.email);
                return self
                    .fail(&tracing_ctx, method, AppError::InvalidCredentials)
                    .await;
            }
            Ok(None) => {
                return self
                    .fail(&tracing_ctx, method, AppError::InvalidCredentials)
                    .await;
            }
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        if let Err(err) = self
            .hashing
            .compare_password(&user.password, &input.password)
            .await
        {
            return self.fail(&tracing_ctx, method, err).await;
        }

        let token = match self.jwt_config.generate_token(user.user_id as i64) {
            Ok(token) => token,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        info!("Admin {} signed in", user.user_id);

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Login successful")
            .await;

        Ok(ApiResponse::success("Login successful", token))
    }

    async fn session_admin(&self, token: &str) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Get;

        let tracing_ctx = self
            .tracer
            .start_tracing("SessionAdmin", vec![KeyValue::new("component", "auth")]);

        let user_id = match self.jwt_config.verify_token(token) {
            Ok(user_id) => user_id,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let user_id = match i32::try_from(user_id) {
            Ok(user_id) => user_id,
            Err(_) => {
                return self
                    .fail(&tracing_ctx, method, AppError::TokenValidationError)
                    .await;
            }
        };

        match self.repository.find_by_id(user_id).await {
            Ok(Some(user)) if is_active_admin(&user) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Session verified")
                    .await;

                Ok(ApiResponse::success(
                    "Session verified",
                    UserResponse::from(user),
                ))
            }
            Ok(Some(_)) => {
                let err = AppError::Forbidden("Administrator access required".to_string());
                self.fail(&tracing_ctx, method, err).await
            }
            Ok(None) => {
                let err = AppError::Forbidden("Session user no longer exists".to_string());
                self.fail(&tracing_ctx, method, err).await
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }

    async fn change_password(
        &self,
        user_id: i32,
        input: &ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, ErrorResponse> {
        let method = Method::Put;

        let tracing_ctx = self.tracer.start_tracing(
            "ChangePassword",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        if let Err(err) = input.check() {
            return self.fail(&tracing_ctx, method, err).await;
        }

        let hashed_password = match self.hashing.hash_password(&input.password).await {
            Ok(hashed) => hashed,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        if let Err(err) = self
            .repository
            .update_password(user_id, &hashed_password)
            .await
        {
            return self.fail(&tracing_ctx, method, err).await;
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Password updated")
            .await;

        Ok(ApiResponse::success("Password updated successfully", ()))
    }

    async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<UserResponse>, ErrorResponse> {
        let method = Method::Post;

        let tracing_ctx = self.tracer.start_tracing(
            "EnsureAdmin",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.to_string()),
            ],
        );

        match self.repository.find_by_email(email).await {
            Ok(Some(existing)) => {
                if !is_active_admin(&existing) {
                    warn!("Bootstrap account {email} exists but is not an enabled administrator");
                }

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Administrator present")
                    .await;

                return Ok(ApiResponse::success(
                    "Administrator already exists",
                    UserResponse::from(existing),
                ));
            }
            Ok(None) => {}
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        }

        let rules = ChangePasswordRequest {
            password: password.to_string(),
            password2: password.to_string(),
        };
        if let Err(err) = rules.check() {
            return self.fail(&tracing_ctx, method, err).await;
        }

        let hashed_password = match self.hashing.hash_password(password).await {
            Ok(hashed) => hashed,
            Err(err) => return self.fail(&tracing_ctx, method, err).await,
        };

        let input = CreateUserRequest {
            firstname: "Admin".to_string(),
            lastname: "Admin".to_string(),
            email: email.to_string(),
            password: hashed_password,
            phone: String::new(),
            currency: "USD".to_string(),
            is_admin: true,
        };

        if let Err(errors) = input.validate() {
            return self
                .fail(&tracing_ctx, method, AppError::ValidationError(errors))
                .await;
        }

        match self.repository.create_user(&input).await {
            Ok(user) => {
                info!("Administrator {} created for {email}", user.user_id);

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Administrator created")
                    .await;

                Ok(ApiResponse::success(
                    "Administrator created",
                    UserResponse::from(user),
                ))
            }
            Err(err) => self.fail(&tracing_ctx, method, err).await,
        }
    }
}
