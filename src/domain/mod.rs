pub mod contact;
pub mod types;
pub mod user;
