use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::utils::AppError;

/// Lifecycle of a deposit or withdrawal request and of its ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Rejected,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Approved => "approved",
            TransactionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "approved" => Ok(TransactionStatus::Approved),
            "rejected" => Ok(TransactionStatus::Rejected),
            other => Err(AppError::InvalidInput(format!(
                "Unknown transaction status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryKind {
    Profit,
    Deposit,
    Withdrawal,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Profit => "PROFIT",
            HistoryKind::Deposit => "DEPOSIT",
            HistoryKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROFIT" => Ok(HistoryKind::Profit),
            "DEPOSIT" => Ok(HistoryKind::Deposit),
            "WITHDRAWAL" => Ok(HistoryKind::Withdrawal),
            other => Err(AppError::InvalidInput(format!(
                "Unknown history type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_stored_values() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
        assert!("APPROVED".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn history_kind_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&HistoryKind::Profit).unwrap(),
            "\"PROFIT\""
        );
        assert_eq!("DEPOSIT".parse::<HistoryKind>().unwrap(), HistoryKind::Deposit);
    }
}
