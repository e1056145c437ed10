use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::account::{Account, CreateAccount, Credentials, PasswordReset};

#[async_trait]
pub trait AccountService: 'static + Sync + Send {
    async fn signin(&self, credentials: Credentials) -> AppResult<Account>;
    async fn signup(&self, mut new_account: CreateAccount) -> AppResult<Account>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn request_password_reset(&self, email: &str) -> AppResult<()>;
    async fn reset_password(&self, reset: PasswordReset) -> AppResult<()>;
}
