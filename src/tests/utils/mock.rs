use std::sync::Arc;

use crate::config::AppConfig;
use crate::container::{Container, Repositories};
use crate::domain::models::account::Account;
use crate::infrastructure::repositories::account::mock::AccountRepositoryImpl;
use crate::infrastructure::repositories::reset_code::mock::ResetCodeRepositoryImpl;
use crate::services::account::encrypt_password;
use crate::services::mailer::mock::MailerImpl;
use crate::tests::utils::tokens::token_service;

pub const PASSWORD: &str = "p4ssw0rd";

pub fn account(id: &str, email: &str) -> Account {
    Account {
        id: id.to_string(),
        name: "Test Account".to_string(),
        email: email.to_string(),
        password: encrypt_password(PASSWORD).unwrap(),
    }
}

/// Container backed by in-memory repositories. The mailer is returned so
/// tests can read the reset codes it was asked to deliver.
pub fn container(accounts: Vec<Account>) -> (Arc<Container>, Arc<MailerImpl>) {
    let repositories = Repositories {
        accounts: Arc::new(AccountRepositoryImpl::with_accounts(accounts)),
        reset_codes: Arc::new(ResetCodeRepositoryImpl::default()),
    };
    let mailer = Arc::new(MailerImpl::default());

    let container = Container::new(
        repositories,
        Arc::new(token_service()),
        mailer.clone(),
        &AppConfig::default().auth,
    );

    (Arc::new(container), mailer)
}
