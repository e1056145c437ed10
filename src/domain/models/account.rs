use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct CreateAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A single-use password reset code bound to one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCode {
    pub account_id: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl ResetCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Clone)]
pub struct PasswordReset {
    pub account_id: String,
    pub code: String,
    pub password: String,
}
