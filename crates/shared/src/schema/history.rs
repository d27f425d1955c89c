use sea_query::Iden;

#[derive(Debug, Iden, Clone, Copy)]
pub enum Histories {
    Table,
    HistoryId,
    Kind,
    Note,
    Amount,
    Reference,
    UserId,
    UserSnapshot,
    Method,
    Status,
    Date,
}

impl Histories {
    pub const COLUMNS: [Histories; 10] = [
        Histories::HistoryId,
        Histories::Kind,
        Histories::Note,
        Histories::Amount,
        Histories::Reference,
        Histories::UserId,
        Histories::UserSnapshot,
        Histories::Method,
        Histories::Status,
        Histories::Date,
    ];
}
