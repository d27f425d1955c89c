use sea_query::Iden;

#[derive(Debug, Iden, Clone, Copy)]
pub enum Withdraws {
    Table,
    WithdrawId,
    UserId,
    Amount,
    Reference,
    Method,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl Withdraws {
    pub const COLUMNS: [Withdraws; 8] = [
        Withdraws::WithdrawId,
        Withdraws::UserId,
        Withdraws::Amount,
        Withdraws::Reference,
        Withdraws::Method,
        Withdraws::Status,
        Withdraws::CreatedAt,
        Withdraws::UpdatedAt,
    ];
}
