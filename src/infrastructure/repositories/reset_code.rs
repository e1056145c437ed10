use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::account::ResetCode;
use crate::domain::repositories::repository::RepositoryResult;
use crate::domain::repositories::reset_code::ResetCodeRepository;
use crate::infrastructure::models::account::ACCOUNT;
use crate::infrastructure::models::reset_code::{RESET_CODE, SurrealResetCode};

pub struct ResetCodeRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl ResetCodeRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResetCodeRepository for ResetCodeRepositoryImpl {
    async fn store(&self, reset_code: ResetCode) -> RepositoryResult<()> {
        self.db
            .query(
                "DELETE type::table($table) \
                 WHERE account = type::thing($account_table, $account) \
                 OR expires_at < time::now()",
            )
            .bind(("table", RESET_CODE))
            .bind(("account_table", ACCOUNT))
            .bind(("account", reset_code.account_id.to_owned()))
            .await?
            .check()?;

        let _: Option<SurrealResetCode> = self
            .db
            .create(RESET_CODE)
            .content(SurrealResetCode::from(reset_code))
            .await?;

        Ok(())
    }

    async fn find(&self, account_id: &str, code: &str) -> RepositoryResult<Option<ResetCode>> {
        let reset_code: Option<SurrealResetCode> = self
            .db
            .query(
                "SELECT account, code, expires_at FROM type::table($table) \
                 WHERE account = type::thing($account_table, $account) AND code = $code",
            )
            .bind(("table", RESET_CODE))
            .bind(("account_table", ACCOUNT))
            .bind(("account", account_id.to_owned()))
            .bind(("code", code.to_owned()))
            .await?
            .take(0)?;

        Ok(reset_code.map(Into::into))
    }

    async fn delete(&self, account_id: &str, code: &str) -> RepositoryResult<()> {
        self.db
            .query(
                "DELETE type::table($table) \
                 WHERE account = type::thing($account_table, $account) AND code = $code",
            )
            .bind(("table", RESET_CODE))
            .bind(("account_table", ACCOUNT))
            .bind(("account", account_id.to_owned()))
            .bind(("code", code.to_owned()))
            .await?
            .check()?;

        Ok(())
    }
}
