use crate::model::user::User;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub balance: Decimal,
    pub invested: Decimal,
    pub account_level: String,
    pub upgrade: bool,
    pub disabled: bool,
    pub cot: String,
    pub currency: String,
    pub withdrawal_pin: String,
    pub is_admin: bool,
    #[schema(format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.user_id,
            firstname: value.firstname,
            lastname: value.lastname,
            email: value.email,
            phone: value.phone,
            balance: value.balance,
            invested: value.invested,
            account_level: value.account_level,
            upgrade: value.upgrade,
            disabled: value.disabled,
            cot: value.cot,
            currency: value.currency,
            withdrawal_pin: value.withdrawal_pin,
            is_admin: value.is_admin,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub history: Vec<super::history::HistoryResponse>,
}
