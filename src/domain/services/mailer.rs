use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::account::Account;

/// Outbound delivery of password reset codes.
#[async_trait]
pub trait Mailer: 'static + Sync + Send {
    async fn send_reset_code(&self, account: &Account, code: &str) -> AppResult<()>;
}
