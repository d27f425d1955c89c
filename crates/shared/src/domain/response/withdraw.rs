use crate::model::withdraw::Withdraw;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct WithdrawResponse {
    pub id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub reference: String,
    pub method: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Withdraw> for WithdrawResponse {
    fn from(value: Withdraw) -> Self {
        WithdrawResponse {
            id: value.withdraw_id,
            user_id: value.user_id,
            amount: value.amount,
            reference: value.reference,
            method: value.method,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
