use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{
    history::UserSnapshot,
    status::{HistoryKind, TransactionStatus},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHistoryRequest {
    pub kind: HistoryKind,
    pub note: Option<String>,
    pub amount: Decimal,
    pub reference: String,
    pub user_id: i32,
    pub user_snapshot: UserSnapshot,
    pub method: String,
    pub status: TransactionStatus,
}
