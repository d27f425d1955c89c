use crate::model::history::History;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct HistoryResponse {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub reference: String,
    pub user_id: i32,
    pub method: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub date: DateTime<Utc>,
}

impl From<History> for HistoryResponse {
    fn from(value: History) -> Self {
        HistoryResponse {
            id: value.history_id,
            kind: value.kind,
            note: value.note,
            amount: value.amount,
            reference: value.reference,
            user_id: value.user_id,
            method: value.method,
            status: value.status,
            date: value.date,
        }
    }
}
