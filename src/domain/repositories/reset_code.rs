use async_trait::async_trait;

use crate::domain::models::account::ResetCode;

use super::repository::RepositoryResult;

#[async_trait]
pub trait ResetCodeRepository: Send + Sync {
    /// Stores `reset_code` as the only code of its account. Expired codes of
    /// every account are purged on the way.
    async fn store(&self, reset_code: ResetCode) -> RepositoryResult<()>;
    async fn find(&self, account_id: &str, code: &str) -> RepositoryResult<Option<ResetCode>>;
    async fn delete(&self, account_id: &str, code: &str) -> RepositoryResult<()>;
}
