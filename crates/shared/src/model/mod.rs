pub mod deposit;
pub mod history;
pub mod site;
pub mod status;
pub mod user;
pub mod withdraw;
