use sea_query::Iden;

#[derive(Debug, Iden, Clone, Copy)]
pub enum Users {
    Table,
    UserId,
    Firstname,
    Lastname,
    Email,
    Password,
    Phone,
    Balance,
    Invested,
    AccountLevel,
    Upgrade,
    Disabled,
    Cot,
    Currency,
    WithdrawalPin,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}

impl Users {
    pub const COLUMNS: [Users; 17] = [
        Users::UserId,
        Users::Firstname,
        Users::Lastname,
        Users::Email,
        Users::Password,
        Users::Phone,
        Users::Balance,
        Users::Invested,
        Users::AccountLevel,
        Users::Upgrade,
        Users::Disabled,
        Users::Cot,
        Users::Currency,
        Users::WithdrawalPin,
        Users::IsAdmin,
        Users::CreatedAt,
        Users::UpdatedAt,
    ];
}
