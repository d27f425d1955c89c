use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use super::user::User;

/// Copy of the account owner taken when the ledger entry was written.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserSnapshot {
    pub user_id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub currency: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        UserSnapshot {
            user_id: user.user_id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            currency: user.currency.clone(),
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct History {
    pub history_id: i32,
    pub kind: String,
    pub note: Option<String>,
    pub amount: Decimal,
    pub reference: String,
    pub user_id: i32,
    pub user_snapshot: Json<UserSnapshot>,
    pub method: String,
    pub status: String,
    pub date: DateTime<Utc>,
}
