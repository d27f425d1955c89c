use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAddressesRequest {
    #[serde(default, alias = "bitcoinAddress")]
    pub bitcoin_address: Option<String>,
    #[serde(default, alias = "bchAddress")]
    pub bch_address: Option<String>,
    #[serde(default, alias = "ethereumAddress")]
    pub ethereum_address: Option<String>,
    #[serde(default, alias = "usdtAddress")]
    pub usdt_address: Option<String>,
    #[serde(default, alias = "whatsappNumber")]
    pub whatsapp_number: Option<String>,
}

/// Keeps `current` when the submitted value is missing or blank.
pub fn keep_unless_blank(submitted: &Option<String>, current: &Option<String>) -> Option<String> {
    match submitted.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => current.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::keep_unless_blank;

    #[test]
    fn blank_submission_keeps_current_value() {
        let current = Some("bc1-old".to_string());

        assert_eq!(keep_unless_blank(&None, &current), current);
        assert_eq!(keep_unless_blank(&Some("   ".into()), &current), current);
        assert_eq!(
            keep_unless_blank(&Some(" bc1-new ".into()), &current),
            Some("bc1-new".to_string())
        );
        assert_eq!(keep_unless_blank(&Some(String::new()), &None), None);
    }
}
