use chrono::{Duration, Utc};
use rstest::fixture;

use crate::domain::models::token::{TokenLifetimes, TokenPair};
use crate::services::token::{SigningKey, TokenServiceImpl};

pub const TEST_SECRET: &[u8] = b"a-test-only-hmac-secret-of-sufficient-length";

#[fixture]
pub fn token_service() -> TokenServiceImpl {
    let key = SigningKey::from_secret(TEST_SECRET).unwrap();

    TokenServiceImpl::new(key, TokenLifetimes::default())
}

/// Access token already expired, refresh token still valid.
pub async fn stale_pair(tokens: &TokenServiceImpl, subject: &str) -> TokenPair {
    tokens
        .issue_at(subject, Utc::now() - Duration::seconds(90))
        .await
        .unwrap()
}

/// Both tokens expired.
pub async fn expired_pair(tokens: &TokenServiceImpl, subject: &str) -> TokenPair {
    tokens
        .issue_at(subject, Utc::now() - Duration::hours(1))
        .await
        .unwrap()
}
