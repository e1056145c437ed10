use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::error::AppResult;
use crate::domain::models::account::Account;
use crate::domain::services::mailer::Mailer;

/// Writes reset links to the log instead of sending them.
pub struct LogMailer {
    reset_url: String,
}

impl LogMailer {
    pub fn new(reset_url: impl Into<String>) -> Self {
        LogMailer {
            reset_url: reset_url.into(),
        }
    }

    fn reset_link(&self, account: &Account, code: &str) -> String {
        format!(
            "{}/{}/{}",
            self.reset_url.trim_end_matches('/'),
            account.id,
            code
        )
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_reset_code(&self, account: &Account, code: &str) -> AppResult<()> {
        info!(account_id = %account.id, email = %account.email, "reset link sent");
        debug!(link = %self.reset_link(account, code));

        Ok(())
    }
}
