pub mod deposit;
pub mod history;
pub mod site;
pub mod user;
pub mod withdraw;
