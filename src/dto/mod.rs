pub mod auth;
pub mod contact;
pub mod main;
pub mod user;
