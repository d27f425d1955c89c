pub mod auth;
pub mod history;
pub mod site;
pub mod user;

pub use self::auth::{ChangePasswordRequest, LoginRequest};
pub use self::history::CreateHistoryRequest;
pub use self::site::{UpdateAddressesRequest, keep_unless_blank};
pub use self::user::{
    AdjustBalanceRequest, CreateUserRequest, EditUserForm, UpdateUserRequest, parse_amount,
};
