pub mod get_account;
pub mod list_accounts;

pub use get_account::get_account;
pub use list_accounts::list_accounts;
