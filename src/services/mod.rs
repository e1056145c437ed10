pub mod account;
pub mod auth_gate;
pub mod mailer;
pub mod token;
