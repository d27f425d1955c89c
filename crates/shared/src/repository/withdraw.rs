use crate::model::{status::TransactionStatus, withdraw::Withdraw};
use crate::schema::withdraw::Withdraws as WithdrawSchema;
use crate::utils::AppError;
use crate::{abstract_trait::WithdrawRepositoryTrait, config::ConnectionPool};
use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

pub struct WithdrawRepository {
    db_pool: ConnectionPool,
}

impl WithdrawRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WithdrawRepositoryTrait for WithdrawRepository {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Withdraw>, AppError> {
        info!("📄 [Withdraw] Fetching withdrawals with status={status}");

        let (sql, values) = Query::select()
            .columns(WithdrawSchema::COLUMNS)
            .from(WithdrawSchema::Table)
            .and_where(Expr::col(WithdrawSchema::Status).eq(status.as_str()))
            .order_by(WithdrawSchema::CreatedAt, Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [Withdraw] Generated SQL: {sql} | Values: {values:?}");

        let rows = sqlx::query_as_with::<_, Withdraw, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Withdraw] Failed to fetch withdrawals: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [Withdraw] Fetched {} record(s)", rows.len());

        Ok(rows)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Withdraw>, AppError> {
        info!("🔎 [Withdraw] Finding withdrawal by reference: {reference}");

        let (sql, values) = Query::select()
            .columns(WithdrawSchema::COLUMNS)
            .from(WithdrawSchema::Table)
            .and_where(Expr::col(WithdrawSchema::Reference).eq(reference))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, Withdraw, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Withdraw] Failed to execute query for reference={reference}: {e}");
                AppError::SqlxError(e)
            })?;

        match &row {
            Some(withdraw) => info!(
                "✅ [Withdraw] Found! ID: {}, User ID: {}, Amount: {}, Status: {}",
                withdraw.withdraw_id, withdraw.user_id, withdraw.amount, withdraw.status
            ),
            None => info!("🟡 [Withdraw] Not found for reference={reference}"),
        }

        Ok(row)
    }

    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Withdraw>, AppError> {
        info!("🔄 [Withdraw] Moving {reference} from {from} to {to}");

        let (sql, values) = Query::update()
            .table(WithdrawSchema::Table)
            .values([
                (WithdrawSchema::Status, to.as_str().into()),
                (WithdrawSchema::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(WithdrawSchema::Reference).eq(reference))
            .and_where(Expr::col(WithdrawSchema::Status).eq(from.as_str()))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [Withdraw] Executing UPDATE: {sql} | Values: {values:?}");

        let row = sqlx::query_as_with::<_, Withdraw, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Withdraw] Failed to update {reference}: {e}");
                AppError::SqlxError(e)
            })?;

        if row.is_none() {
            info!("🟡 [Withdraw] {reference} was not {from}, nothing changed");
        }

        Ok(row)
    }
}
