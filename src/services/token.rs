use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use crate::domain::models::token::{
    Claims, Token, TokenKind, TokenLifetimes, TokenPair, Verification,
};
use crate::domain::services::token::{TokenError, TokenService};

/// Shortest HMAC secret accepted at startup.
pub const MIN_SECRET_LEN: usize = 32;

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::SigningConfiguration(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }

        Ok(SigningKey {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

pub struct TokenServiceImpl {
    key: SigningKey,
    lifetimes: TokenLifetimes,
    validation: Validation,
}

impl TokenServiceImpl {
    pub fn new(key: SigningKey, lifetimes: TokenLifetimes) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        TokenServiceImpl {
            key,
            lifetimes,
            validation,
        }
    }

    /// Issues a pair as if the login happened at `issued_at`.
    pub async fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        let (access, refresh) = futures::try_join!(
            self.sign(subject, TokenKind::Access, issued_at),
            self.sign(subject, TokenKind::Refresh, issued_at),
        )?;

        Ok(TokenPair { access, refresh })
    }

    async fn sign(
        &self,
        subject: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<Token, TokenError> {
        let ttl = self.ttl(kind);

        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::SigningConfiguration(format!("ttl overflow: {ttl}")))?
            .timestamp();

        let claims = Claims {
            sub: subject.to_owned(),
            iat: issued_at.timestamp(),
            exp: expiration,
            kind,
        };

        let value = encode(&Header::new(ALGORITHM), &claims, &self.key.encoding)
            .map_err(|err| TokenError::SigningConfiguration(err.to_string()))?;

        Ok(Token {
            value,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.lifetimes.access,
            TokenKind::Refresh => self.lifetimes.refresh,
        }
    }
}

#[async_trait]
impl TokenService for TokenServiceImpl {
    async fn issue(&self, subject: &str) -> Result<TokenPair, TokenError> {
        self.issue_at(subject, Utc::now()).await
    }

    async fn verify(&self, token: &str) -> Result<Verification, TokenError> {
        match decode::<Claims>(token, &self.key.decoding, &self.validation) {
            Ok(data) => Ok(Verification::Valid {
                subject: data.claims.sub.clone(),
                claims: data.claims,
            }),
            Err(error) => match error.kind() {
                ErrorKind::ExpiredSignature => Ok(Verification::Invalid { expired: true }),
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::ImmatureSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::InvalidSubject
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => {
                    debug!(reason = ?error.kind(), "malformed token");
                    Ok(Verification::Invalid { expired: false })
                }
                _ => Err(TokenError::SigningConfiguration(format!("{error:?}"))),
            },
        }
    }

    async fn renew(&self, refresh: &str) -> Result<Token, TokenError> {
        match self.verify(refresh).await? {
            Verification::Valid { subject, claims } if claims.kind == TokenKind::Refresh => {
                self.sign(&subject, TokenKind::Access, Utc::now()).await
            }
            _ => Err(TokenError::ExpiredOrInvalidRefresh),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::tokens::{TEST_SECRET, token_service};

    use rstest::*;

    fn past(seconds: i64) -> DateTime<Utc> {
        Utc::now() - Duration::seconds(seconds)
    }

    fn tamper(token: &str) -> String {
        let (rest, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { "B" } else { "A" };
        format!("{rest}.{flipped}{}", &signature[1..])
    }

    #[rstest]
    #[tokio::test]
    async fn test_issued_access_token_carries_subject(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        let verification = token_service.verify(&pair.access.value).await.unwrap();

        assert_eq!(verification.subject(), Some("u1"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_pair_lifetimes(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        assert_eq!(pair.access.expires_at - pair.access.issued_at, 60);
        assert_eq!(pair.refresh.expires_at - pair.refresh.issued_at, 600);
        assert_ne!(pair.access.value, pair.refresh.value);
    }

    #[rstest]
    #[tokio::test]
    async fn test_claims_of_valid_token(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        match token_service.verify(&pair.refresh.value).await.unwrap() {
            Verification::Valid { subject, claims } => {
                assert_eq!(subject, "u1");
                assert_eq!(claims.kind, TokenKind::Refresh);
                assert_eq!(claims.exp, pair.refresh.expires_at);
            }
            other => panic!("expected a valid token, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_access_token_expires(token_service: TokenServiceImpl) {
        let pair = token_service.issue_at("u1", past(61)).await.unwrap();

        assert_eq!(
            token_service.verify(&pair.access.value).await.unwrap(),
            Verification::Invalid { expired: true }
        );
        assert!(token_service.verify(&pair.refresh.value).await.unwrap().is_valid());
    }

    #[rstest]
    #[case::garbage("invalidtoken")]
    #[case::header_only("eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzUxMiJ9")]
    #[case::empty("")]
    #[tokio::test]
    async fn test_malformed_token(token_service: TokenServiceImpl, #[case] token: &str) {
        assert_eq!(
            token_service.verify(token).await.unwrap(),
            Verification::Invalid { expired: false }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_tampered_signature(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        assert_eq!(
            token_service.verify(&tamper(&pair.access.value)).await.unwrap(),
            Verification::Invalid { expired: false }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_expired_and_tampered_is_malformed(token_service: TokenServiceImpl) {
        let pair = token_service.issue_at("u1", past(3600)).await.unwrap();

        assert_eq!(
            token_service.verify(&tamper(&pair.access.value)).await.unwrap(),
            Verification::Invalid { expired: false }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_foreign_key_is_rejected(token_service: TokenServiceImpl) {
        let other = TokenServiceImpl::new(
            SigningKey::from_secret(b"another-secret-that-is-long-enough!!").unwrap(),
            TokenLifetimes::default(),
        );
        let pair = other.issue("u1").await.unwrap();

        assert_eq!(
            token_service.verify(&pair.access.value).await.unwrap(),
            Verification::Invalid { expired: false }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_renew_keeps_subject(token_service: TokenServiceImpl) {
        let pair = token_service.issue_at("u1", past(90)).await.unwrap();

        let refreshed = token_service.renew(&pair.refresh.value).await.unwrap();
        let verification = token_service.verify(&refreshed.value).await.unwrap();

        let refresh_subject = token_service
            .verify(&pair.refresh.value)
            .await
            .unwrap()
            .subject()
            .map(str::to_owned);

        assert_eq!(verification.subject().map(str::to_owned), refresh_subject);
        assert_eq!(refreshed.expires_at - refreshed.issued_at, 60);
        assert!(refreshed.expires_at > pair.access.expires_at);
    }

    #[rstest]
    #[tokio::test]
    async fn test_renew_issues_access_kind(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();
        let refreshed = token_service.renew(&pair.refresh.value).await.unwrap();

        match token_service.verify(&refreshed.value).await.unwrap() {
            Verification::Valid { claims, .. } => assert_eq!(claims.kind, TokenKind::Access),
            other => panic!("expected a valid token, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_renew_expired_refresh(token_service: TokenServiceImpl) {
        let pair = token_service.issue_at("u1", past(601)).await.unwrap();

        assert_eq!(
            token_service.renew(&pair.refresh.value).await.unwrap_err(),
            TokenError::ExpiredOrInvalidRefresh
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_renew_tampered_refresh(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        assert_eq!(
            token_service
                .renew(&tamper(&pair.refresh.value))
                .await
                .unwrap_err(),
            TokenError::ExpiredOrInvalidRefresh
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_access_token_cannot_renew(token_service: TokenServiceImpl) {
        let pair = token_service.issue("u1").await.unwrap();

        assert_eq!(
            token_service.renew(&pair.access.value).await.unwrap_err(),
            TokenError::ExpiredOrInvalidRefresh
        );
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::short(b"too-short".as_slice())]
    fn test_weak_secret_is_a_configuration_error(#[case] secret: &[u8]) {
        assert!(matches!(
            SigningKey::from_secret(secret),
            Err(TokenError::SigningConfiguration(_))
        ));
    }

    #[test]
    fn test_minimum_secret_is_accepted() {
        assert!(SigningKey::from_secret(&TEST_SECRET[..MIN_SECRET_LEN]).is_ok());
    }
}
