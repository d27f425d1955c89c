use crate::model::deposit::Deposit;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct DepositResponse {
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

impl From<Deposit> for DepositResponse {
    fn from(value: Deposit) -> Self {
        DepositResponse {
            id: value.deposit_id,
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
