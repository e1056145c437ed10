use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::token::{Token, TokenPair, Verification};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Refresh token is invalid or has expired. Please reauthenticate.")]
    ExpiredOrInvalidRefresh,
    #[error("token signing is misconfigured: {0}")]
    SigningConfiguration(String),
}

#[async_trait]
pub trait TokenService: 'static + Sync + Send {
    /// Signs an access and a refresh token for `subject`.
    async fn issue(&self, subject: &str) -> Result<TokenPair, TokenError>;

    /// Checks signature and expiry. Expected failures are reported through
    /// [`Verification::Invalid`]; only misconfiguration is an error.
    async fn verify(&self, token: &str) -> Result<Verification, TokenError>;

    /// Exchanges a valid refresh token for a fresh access token.
    async fn renew(&self, refresh: &str) -> Result<Token, TokenError>;
}
