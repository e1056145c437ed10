pub mod account;
pub mod root;
