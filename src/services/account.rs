use std::sync::Arc;

use crate::domain::{
    error::{AppError, AppResult},
    models::account::{Account, CreateAccount, Credentials, PasswordReset, ResetCode},
    repositories::account::{AccountRepository, FindByCol},
    repositories::reset_code::ResetCodeRepository,
    services::account::AccountService,
    services::mailer::Mailer,
};

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, Result, SaltString, rand_core::OsRng,
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

const RESET_CODE_TTL_MINUTES: i64 = 10;

pub struct AccountServiceImpl {
    repository: Arc<dyn AccountRepository>,
    reset_codes: Arc<dyn ResetCodeRepository>,
    mailer: Arc<dyn Mailer>,
}

impl AccountServiceImpl {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        reset_codes: Arc<dyn ResetCodeRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            repository,
            reset_codes,
            mailer,
        }
    }

    async fn is_account(&self, email: &str) -> AppResult<bool> {
        Ok(self.repository.is_account(email).await?)
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn signup(&self, mut new_account: CreateAccount) -> AppResult<Account> {
        if self.is_account(&new_account.email).await? {
            return Err(AppError::Conflict("Account already exists"));
        }

        new_account.password = encrypt_password(&new_account.password)?;

        Ok(self.repository.signup(new_account).await?)
    }

    async fn signin(&self, credentials: Credentials) -> AppResult<Account> {
        let account = match self.find_by_email(&credentials.email).await? {
            Some(account) => account,
            None => return Err(AppError::Unauthorized()),
        };

        verify_password(&credentials.password, &account.password)?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .repository
            .find_one(FindByCol::Email(email.to_string()))
            .await?)
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let Some(account) = self.find_by_email(email).await? else {
            return Err(AppError::BadRequest("Account does not exist"));
        };

        let reset_code = ResetCode {
            account_id: account.id.clone(),
            code: generate_reset_code(),
            expires_at: Utc::now() + Duration::minutes(RESET_CODE_TTL_MINUTES),
        };

        self.reset_codes.store(reset_code.clone()).await?;
        self.mailer
            .send_reset_code(&account, &reset_code.code)
            .await?;

        info!(account_id = %account.id, "password reset requested");

        Ok(())
    }

    async fn reset_password(&self, reset: PasswordReset) -> AppResult<()> {
        if self.find_by_id(&reset.account_id).await?.is_none() {
            return Err(AppError::BadRequest("Invalid user"));
        }

        let valid = self
            .reset_codes
            .find(&reset.account_id, &reset.code)
            .await?
            .is_some_and(|code| !code.is_expired(Utc::now()));

        if !valid {
            return Err(AppError::BadRequest("Invalid link or expired"));
        }

        let password = encrypt_password(&reset.password)?;

        self.repository
            .update_password(&reset.account_id, password)
            .await?;
        self.reset_codes
            .delete(&reset.account_id, &reset.code)
            .await?;

        info!(account_id = %reset.account_id, "password reset");

        Ok(())
    }
}

pub fn encrypt_password(password: &str) -> Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let argon2 = Argon2::default();
    let hash = PasswordHash::new(hash);

    argon2.verify_password(password.as_bytes(), &hash?)
}

// 64 hex characters, two random v4 UUIDs back to back.
fn generate_reset_code() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
