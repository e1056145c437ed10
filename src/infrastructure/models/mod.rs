pub mod account;
pub mod reset_code;
