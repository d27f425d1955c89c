use sea_query::Iden;

#[derive(Debug, Iden, Clone, Copy)]
pub enum Deposits {
    Table,
    DepositId,
    UserId,
    Amount,
    Reference,
    Method,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl Deposits {
    pub const COLUMNS: [Deposits; 8] = [
        Deposits::DepositId,
        Deposits::UserId,
        Deposits::Amount,
        Deposits::Reference,
        Deposits::Method,
        Deposits::Status,
        Deposits::CreatedAt,
        Deposits::UpdatedAt,
    ];
}
