use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::AppError;

/// Parses an admin supplied amount. Surrounding whitespace is ignored;
/// non-numeric and zero amounts are refused.
pub fn parse_amount(raw: &str) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| AppError::InvalidInput(format!("Invalid amount '{trimmed}'")))?;

    if amount.is_zero() {
        return Err(AppError::InvalidInput("Amount must not be zero".to_string()));
    }

    Ok(amount)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdjustBalanceRequest {
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub firstname: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Already hashed.
    pub password: String,

    pub phone: String,
    pub currency: String,
    pub is_admin: bool,
}

/// Edit form as submitted by the admin page. Every field arrives as text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EditUserForm {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub invested: String,
    #[serde(default)]
    pub upgrade: Option<String>,
    #[serde(default)]
    pub disabled: Option<String>,
    #[serde(default, alias = "accountLevel")]
    pub account_level: String,
    #[serde(default)]
    pub cot: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default, alias = "withdrawalPin")]
    pub withdrawal_pin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    pub id: i32,

    #[validate(length(min = 1, message = "First name is required"))]
    pub firstname: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub balance: Decimal,
    pub invested: Decimal,
    pub upgrade: bool,
    pub disabled: bool,
    pub account_level: String,
    pub cot: String,
    pub phone: String,
    pub currency: String,
    pub withdrawal_pin: String,
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "on" | "1" | "yes")
    )
}

fn parse_figure(field: &str, raw: &str) -> Result<Decimal, AppError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .map_err(|_| AppError::InvalidInput(format!("{field} must be a number, got '{trimmed}'")))
}

impl UpdateUserRequest {
    pub fn from_form(id: i32, form: &EditUserForm) -> Result<Self, AppError> {
        let request = UpdateUserRequest {
            id,
            firstname: form.firstname.trim().to_string(),
            lastname: form.lastname.trim().to_string(),
            email: form.email.trim().to_string(),
            balance: parse_figure("Balance", &form.balance)?,
            invested: parse_figure("Invested", &form.invested)?,
            upgrade: parse_flag(form.upgrade.as_deref()),
            disabled: parse_flag(form.disabled.as_deref()),
            account_level: form.account_level.trim().to_string(),
            cot: form.cot.trim().to_string(),
            phone: form.phone.trim().to_string(),
            currency: form.currency.trim().to_string(),
            withdrawal_pin: form.withdrawal_pin.trim().to_string(),
        };

        request.validate()?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn parse_amount_trims_input() {
        assert_eq!(parse_amount(" 50 ").unwrap(), dec!(50));
        assert_eq!(parse_amount("12.75").unwrap(), dec!(12.75));
        assert_eq!(parse_amount("-20").unwrap(), dec!(-20));
    }

    #[test]
    fn parse_amount_refuses_garbage_and_zero() {
        assert!(matches!(parse_amount("abc"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_amount("0"), Err(AppError::InvalidInput(_))));
    }

    fn form() -> EditUserForm {
        EditUserForm {
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@example.com".into(),
            balance: "100.50".into(),
            invested: "40".into(),
            upgrade: Some("on".into()),
            disabled: None,
            account_level: "gold".into(),
            cot: "COT-1".into(),
            phone: "+100".into(),
            currency: "EUR".into(),
            withdrawal_pin: "1234".into(),
        }
    }

    #[test]
    fn edit_form_is_parsed_into_typed_request() {
        let req = UpdateUserRequest::from_form(3, &form()).unwrap();

        assert_eq!(req.id, 3);
        assert_eq!(req.balance, dec!(100.50));
        assert_eq!(req.invested, dec!(40));
        assert!(req.upgrade);
        assert!(!req.disabled);
        assert_eq!(req.account_level, "gold");
    }

    #[test]
    fn edit_form_with_bad_balance_is_refused() {
        let mut bad = form();
        bad.balance = "lots".into();

        let err = UpdateUserRequest::from_form(3, &bad).unwrap_err();
        assert!(err.to_string().contains("Balance"));
    }

    #[test]
    fn edit_form_with_bad_email_is_refused() {
        let mut bad = form();
        bad.email = "nope".into();

        assert!(matches!(
            UpdateUserRequest::from_form(3, &bad),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn camel_case_form_names_are_accepted() {
        let form: EditUserForm =
            serde_json::from_str(r#"{"accountLevel":"silver","withdrawalPin":"9999"}"#).unwrap();
        assert_eq!(form.account_level, "silver");
        assert_eq!(form.withdrawal_pin, "9999");
    }
}
