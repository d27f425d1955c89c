use crate::model::{deposit::Deposit, status::TransactionStatus};
use crate::schema::deposit::Deposits as DepositSchema;
use crate::utils::AppError;
use crate::{abstract_trait::DepositRepositoryTrait, config::ConnectionPool};
use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

pub struct DepositRepository {
    db_pool: ConnectionPool,
}

impl DepositRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DepositRepositoryTrait for DepositRepository {
    async fn find_by_status(&self, status: TransactionStatus) -> Result<Vec<Deposit>, AppError> {
        info!("📄 [Deposit] Fetching deposits with status={status}");

        let (sql, values) = Query::select()
            .columns(DepositSchema::COLUMNS)
            .from(DepositSchema::Table)
            .and_where(Expr::col(DepositSchema::Status).eq(status.as_str()))
            .order_by(DepositSchema::CreatedAt, Order::Asc)
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [Deposit] Generated SQL: {sql} | Values: {values:?}");

        let rows = sqlx::query_as_with::<_, Deposit, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Deposit] Failed to fetch deposits: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [Deposit] Fetched {} record(s)", rows.len());

        Ok(rows)
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Deposit>, AppError> {
        info!("🔎 [Deposit] Finding deposit by reference: {reference}");

        let (sql, values) = Query::select()
            .columns(DepositSchema::COLUMNS)
            .from(DepositSchema::Table)
            .and_where(Expr::col(DepositSchema::Reference).eq(reference))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, Deposit, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Deposit] Failed to execute query for reference={reference}: {e}");
                AppError::SqlxError(e)
            })?;

        match &row {
            Some(deposit) => info!(
                "✅ [Deposit] Found! ID: {}, User ID: {}, Amount: {}, Status: {}",
                deposit.deposit_id, deposit.user_id, deposit.amount, deposit.status
            ),
            None => info!("🟡 [Deposit] Not found for reference={reference}"),
        }

        Ok(row)
    }

    async fn transition_status(
        &self,
        reference: &str,
        from: TransactionStatus,
        to: TransactionStatus,
    ) -> Result<Option<Deposit>, AppError> {
        info!("🔄 [Deposit] Moving {reference} from {from} to {to}");

        let (sql, values) = Query::update()
            .table(DepositSchema::Table)
            .values([
                (DepositSchema::Status, to.as_str().into()),
                (DepositSchema::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(DepositSchema::Reference).eq(reference))
            .and_where(Expr::col(DepositSchema::Status).eq(from.as_str()))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        info!("🧾 [Deposit] Executing UPDATE: {sql} | Values: {values:?}");

        let row = sqlx::query_as_with::<_, Deposit, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Deposit] Failed to update {reference}: {e}");
                AppError::SqlxError(e)
            })?;

        if row.is_none() {
            info!("🟡 [Deposit] {reference} was not {from}, nothing changed");
        }

        Ok(row)
    }
}
