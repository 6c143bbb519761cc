//! Account data types shared by stores, the coordinator and the front end.

pub mod account;
pub mod view;

pub use account::{Account, AccountId, AccountUpdate};
pub use view::AccountView;
