pub mod account;
pub mod repository;
pub mod reset_code;
