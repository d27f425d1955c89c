use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{deposit::DepositResponse, user::UserResponse, withdraw::WithdrawResponse};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Clone)]
pub struct DashboardResponse {
    pub users: Vec<UserResponse>,
    pub pending_deposits: Vec<DepositResponse>,
    pub pending_withdrawals: Vec<WithdrawResponse>,
}
