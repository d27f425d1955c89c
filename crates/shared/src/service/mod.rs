pub mod auth;
pub mod deposit;
pub mod site;
pub mod user;
pub mod withdraw;

#[cfg(test)]
mod tests;
