use sea_query::Iden;

#[derive(Debug, Iden, Clone, Copy)]
pub enum Sites {
    Table,
    SiteId,
    BitcoinAddress,
    BchAddress,
    EthereumAddress,
    UsdtAddress,
    WhatsappNumber,
    UpdatedAt,
}

impl Sites {
    pub const COLUMNS: [Sites; 7] = [
        Sites::SiteId,
        Sites::BitcoinAddress,
        Sites::BchAddress,
        Sites::EthereumAddress,
        Sites::UsdtAddress,
        Sites::WhatsappNumber,
        Sites::UpdatedAt,
    ];
}
