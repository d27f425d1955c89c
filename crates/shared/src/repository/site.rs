use crate::model::site::Site;
use crate::schema::site::Sites;
use crate::utils::AppError;
use crate::{
    abstract_trait::SiteRepositoryTrait, config::ConnectionPool,
    domain::request::UpdateAddressesRequest,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

pub struct SiteRepository {
    db_pool: ConnectionPool,
}

impl SiteRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SiteRepositoryTrait for SiteRepository {
    async fn find_first(&self) -> Result<Option<Site>, AppError> {
        let (sql, values) = Query::select()
            .columns(Sites::COLUMNS)
            .from(Sites::Table)
            .order_by(Sites::SiteId, Order::Asc)
            .limit(1)
            .build_sqlx(PostgresQueryBuilder);

        let site = sqlx::query_as_with::<_, Site, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Site] Failed to load site settings: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(site)
    }

    async fn create(&self, input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        info!("🆕 [Site] Creating site settings");

        let (sql, values) = Query::insert()
            .into_table(Sites::Table)
            .columns([
                Sites::BitcoinAddress,
                Sites::BchAddress,
                Sites::EthereumAddress,
                Sites::UsdtAddress,
                Sites::WhatsappNumber,
            ])
            .values([
                input.bitcoin_address.clone().into(),
                input.bch_address.clone().into(),
                input.ethereum_address.clone().into(),
                input.usdt_address.clone().into(),
                input.whatsapp_number.clone().into(),
            ])
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let site = sqlx::query_as_with::<_, Site, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("❌ [Site] Failed to create site settings: {e}");
                AppError::SqlxError(e)
            })?;

        Ok(site)
    }

    async fn update(&self, site_id: i32, input: &UpdateAddressesRequest) -> Result<Site, AppError> {
        info!("🔄 [Site] Updating site settings {site_id}");

        let (sql, values) = Query::update()
            .table(Sites::Table)
            .values([
                (Sites::BitcoinAddress, input.bitcoin_address.clone().into()),
                (Sites::BchAddress, input.bch_address.clone().into()),
                (Sites::EthereumAddress, input.ethereum_address.clone().into()),
                (Sites::UsdtAddress, input.usdt_address.clone().into()),
                (Sites::WhatsappNumber, input.whatsapp_number.clone().into()),
                (Sites::UpdatedAt, Utc::now().into()),
            ])
            .and_where(Expr::col(Sites::SiteId).eq(site_id))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        let site = sqlx::query_as_with::<_, Site, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => {
                    AppError::NotFound(format!("Site settings {site_id} not found"))
                }
                other => {
                    error!("❌ [Site] Failed to update site settings: {other}");
                    AppError::SqlxError(other)
                }
            })?;

        Ok(site)
    }
}
