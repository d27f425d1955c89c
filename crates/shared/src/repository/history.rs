use crate::model::{history::History, status::TransactionStatus};
use crate::schema::history::Histories;
use crate::utils::AppError;
use crate::{
    abstract_trait::HistoryRepositoryTrait, config::ConnectionPool,
    domain::request::CreateHistoryRequest,
};
use async_trait::async_trait;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info, warn};

pub struct HistoryRepository {
    db_pool: ConnectionPool,
}

impl HistoryRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl HistoryRepositoryTrait for HistoryRepository {
    async fn create(&self, input: &CreateHistoryRequest) -> Result<History, AppError> {
        info!(
            "📝 [History] Recording {} of {} for user_id={} (reference={})",
            input.kind, input.amount, input.user_id, input.reference
        );

        let snapshot = serde_json::to_value(&input.user_snapshot)?;

        let (sql, values) = Query::insert()
            .into_table(Histories::Table)
            .columns([
                Histories::Kind,
                Histories::Note,
                Histories::Amount,
                Histories::Reference,
                Histories::UserId,
                Histories::UserSnapshot,
                Histories::Method,
                Histories::Status,
            ])
            .values([
                input.kind.as_str().into(),
                input.note.clone().into(),
                input.amount.into(),
                input.reference.clone().into(),
                input.user_id.into(),
                snapshot.into(),
                input.method.clone().into(),
                input.status.as_str().into(),
            ])
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_as_with::<_, History, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [History] Failed to record entry: {e}");
                AppError::SqlxError(e)
            })?;

        info!("✅ [History] Recorded history_id={}", row.history_id);

        Ok(row)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<History>, AppError> {
        info!("👤 [History] Fetching ledger for user_id={user_id}");

        let (sql, values) = Query::select()
            .columns(Histories::COLUMNS)
            .from(Histories::Table)
            .and_where(Expr::col(Histories::UserId).eq(user_id))
            .order_by(Histories::Date, Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_as_with::<_, History, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [History] Failed to fetch ledger for user_id={user_id}: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(rows)
    }

    async fn update_status_by_reference(
        &self,
        reference: &str,
        status: TransactionStatus,
    ) -> Result<u64, AppError> {
        info!("🔄 [History] Setting status={status} for reference={reference}");

        let (sql, values) = Query::update()
            .table(Histories::Table)
            .values([(Histories::Status, status.as_str().into())])
            .and_where(Expr::col(Histories::Reference).eq(reference))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [History] Failed to update reference={reference}: {e}");
                AppError::SqlxError(e)
            })?;

        if result.rows_affected() == 0 {
            warn!("🟡 [History] No ledger entry carries reference={reference}");
        }

        Ok(result.rows_affected())
    }
}
