use crate::model::site::Site;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema, Clone, Default, PartialEq)]
pub struct SiteResponse {
    pub bitcoin_address: Option<String>,
    pub bch_address: Option<String>,
    pub ethereum_address: Option<String>,
    pub usdt_address: Option<String>,
    pub whatsapp_number: Option<String>,
}

impl From<Site> for SiteResponse {
    fn from(value: Site) -> Self {
        SiteResponse {
            bitcoin_address: value.bitcoin_address,
            bch_address: value.bch_address,
            ethereum_address: value.ethereum_address,
            usdt_address: value.usdt_address,
            whatsapp_number: value.whatsapp_number,
        }
    }
}
