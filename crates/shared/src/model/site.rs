use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, Default)]
pub struct Site {
    pub site_id: i32,
    pub bitcoin_address: Option<String>,
    pub bch_address: Option<String>,
    pub ethereum_address: Option<String>,
    pub usdt_address: Option<String>,
    pub whatsapp_number: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
