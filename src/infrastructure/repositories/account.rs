use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::account::{Account, CreateAccount};
use crate::domain::repositories::account::{AccountRepository, FindByCol};
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::models::account::{
    ACCOUNT, SurrealAccount, SurrealAccountCreate, SurrealCount,
};

pub struct AccountRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl AccountRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryImpl {
    async fn signup(&self, new_account: CreateAccount) -> RepositoryResult<Account> {
        let account: Option<SurrealAccount> = self
            .db
            .create(ACCOUNT)
            .content(SurrealAccountCreate::from(new_account))
            .await?;

        account
            .map(Into::into)
            .ok_or(RepositoryError::NotCreated(ACCOUNT))
    }

    async fn is_account(&self, email: &str) -> RepositoryResult<bool> {
        let mut res = self
            .db
            .query("(SELECT count() FROM type::table($table) WHERE email = type::string($email))[0] or { count: 0 }")
            .bind(("table", ACCOUNT))
            .bind(("email", email.to_owned()))
            .await?;

        let counter = res.take::<Option<SurrealCount>>(0)?;

        Ok(counter.is_some_and(|counter| counter.count > 0))
    }

    async fn find_one(&self, column: FindByCol) -> RepositoryResult<Option<Account>> {
        let account: Option<SurrealAccount> = self
            .db
            .query(format!(
                "SELECT * FROM type::table($table) WHERE {column} = type::string($value)"
            ))
            .bind(("table", ACCOUNT))
            .bind(("value", column.value()))
            .await?
            .take(0)?;

        Ok(account.map(Into::into))
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Account>> {
        let account: Option<SurrealAccount> = self.db.select((ACCOUNT, id.to_owned())).await?;

        Ok(account.map(Into::into))
    }

    async fn update_password(&self, id: &str, password: String) -> RepositoryResult<()> {
        self.db
            .query("UPDATE type::thing($table, $id) SET password = $password")
            .bind(("table", ACCOUNT))
            .bind(("id", id.to_owned()))
            .bind(("password", password))
            .await?
            .check()?;

        Ok(())
    }
}
