use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

use crate::abstract_trait::UserRepositoryTrait;
use crate::config::ConnectionPool;
use crate::domain::request::{CreateUserRequest, UpdateUserRequest};
use crate::model::user::User;
use crate::schema::user::Users;
use crate::utils::AppError;

pub struct UserRepository {
    db_pool: ConnectionPool,
}

impl UserRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_clients(&self) -> Result<Vec<User>, AppError> {
        info!("👥 [User] Fetching all client accounts");

        let (sql, values) = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::IsAdmin).eq(false))
            .order_by(Users::UserId, Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        let users = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [User] Error fetching clients: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [User] Found {} clients", users.len());

        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        info!("🆔 [User] Finding user by id: {id}");

        let (sql, values) = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::UserId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [User] Failed to fetch user {id}: {e}");
                AppError::SqlxError(e)
            })?;

        if user.is_none() {
            info!("🟡 [User] No user with id {id}");
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        info!("📧 [User] Finding user by email: {email}");

        let (sql, values) = Query::select()
            .columns(Users::COLUMNS)
            .from(Users::Table)
            .and_where(Expr::col(Users::Email).eq(email))
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(user)
    }

    async fn create_user(&self, input: &CreateUserRequest) -> Result<User, AppError> {
        info!("🆕 [User] Creating user {}", input.email);

        let (sql, values) = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Firstname,
                Users::Lastname,
                Users::Email,
                Users::Password,
                Users::Phone,
                Users::Currency,
                Users::IsAdmin,
            ])
            .values([
                input.firstname.clone().into(),
                input.lastname.clone().into(),
                input.email.clone().into(),
                input.password.clone().into(),
                input.phone.clone().into(),
                input.currency.clone().into(),
                input.is_admin.into(),
            ])
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [User] Failed to create user {}: {e}", input.email);
                AppError::SqlxError(e)
            })?;

        info!("✅ [User] Created user_id={}", user.user_id);

        Ok(user)
    }

    async fn update_user(&self, input: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        info!("🔄 [User] Overwriting account fields for user {}", input.id);

        let (sql, values) = Query::update()
            .table(Users::Table)
            .values([
                (Users::Firstname, input.firstname.clone().into()),
                (Users::Lastname, input.lastname.clone().into()),
                (Users::Email, input.email.clone().into()),
                (Users::Balance, input.balance.into()),
                (Users::Invested, input.invested.into()),
                (Users::Upgrade, input.upgrade.into()),
                (Users::Disabled, input.disabled.into()),
                (Users::AccountLevel, input.account_level.clone().into()),
                (Users::Cot, input.cot.clone().into()),
                (Users::Phone, input.phone.clone().into()),
                (Users::Currency, input.currency.clone().into()),
                (Users::WithdrawalPin, input.withdrawal_pin.clone().into()),
                (Users::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(Users::UserId).eq(input.id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [User] Executing UPDATE: {sql}");

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [User] Failed to update user {}: {e}", input.id);
                AppError::SqlxError(e)
            })?;

        Ok(user)
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), AppError> {
        info!("🔑 [User] Updating password for user {id}");

        let (sql, values) = Query::update()
            .table(Users::Table)
            .values([
                (Users::Password, password_hash.into()),
                (Users::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(Users::UserId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(AppError::SqlxError)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User ID {id} not found")));
        }

        Ok(())
    }

    async fn adjust_balance(
        &self,
        id: i32,
        balance_delta: Decimal,
        invested_delta: Decimal,
    ) -> Result<Option<User>, AppError> {
        info!(
            "💰 [User] Adjusting user {id}: balance delta {balance_delta}, invested delta {invested_delta}"
        );

        let (sql, values) = Query::update()
            .table(Users::Table)
            .values([
                (Users::Balance, Expr::col(Users::Balance).add(balance_delta)),
                (
                    Users::Invested,
                    Expr::col(Users::Invested).add(invested_delta),
                ),
                (Users::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(Users::UserId).eq(id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [User] Executing UPDATE: {sql}");

        let user = sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [User] Failed to adjust balance for user {id}: {e}");
                AppError::SqlxError(e)
            })?;

        match &user {
            Some(u) => info!(
                "✅ [User] user {id} now has balance={}, invested={}",
                u.balance, u.invested
            ),
            None => info!("🟡 [User] No user with id {id} to adjust"),
        }

        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        info!("🗑️ [User] Deleting user {id}");

        let (sql, values) = Query::delete()
            .from_table(Users::Table)
            .and_where(Expr::col(Users::UserId).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(AppError::SqlxError)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User ID {id} not found")));
        }

        info!("✅ [User] Deleted user {id}");

        Ok(())
    }
}
