use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::error::AppError;
use crate::domain::models::auth::{Admission, AuthenticatedIdentity, Fallback, PublicRoutes};
use crate::domain::models::token::{TokenKind, Verification};
use crate::domain::services::token::{TokenError, TokenService};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GateError {
    #[error("Token is missing")]
    MissingToken,
    #[error("access token is invalid and no refresh token was presented")]
    Unauthenticated,
    #[error("renewed access token failed verification")]
    RenewalRejected,
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<GateError> for AppError {
    fn from(error: GateError) -> Self {
        match error {
            GateError::Token(error) => error.into(),
            _ => AppError::Unauthorized().trace(&error.to_string()),
        }
    }
}

/// Credentials found on an incoming request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Credentials<'a> {
    pub access: Option<&'a str>,
    pub refresh: Option<&'a str>,
}

/// Decides whether a request is admitted, and with which identity.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<dyn TokenService>,
    public_routes: PublicRoutes,
    fallback: Fallback,
}

impl AuthGate {
    pub fn new(
        tokens: Arc<dyn TokenService>,
        public_routes: PublicRoutes,
        fallback: Fallback,
    ) -> Self {
        AuthGate {
            tokens,
            public_routes,
            fallback,
        }
    }

    pub async fn admit(
        &self,
        path: &str,
        credentials: Credentials<'_>,
    ) -> Result<Admission, GateError> {
        if self.public_routes.contains(path) {
            return Ok(Admission::Public);
        }

        let Some(access) = non_empty(credentials.access) else {
            info!(path, "rejected request without token");
            return Err(GateError::MissingToken);
        };

        let verification = self.tokens.verify(access).await?;

        if let Some(identity) = access_identity(&verification) {
            return Ok(Admission::Verified(identity));
        }

        debug!(path, ?verification, "access token not accepted");

        match non_empty(credentials.refresh) {
            Some(refresh) => self.renew(refresh).await,
            None => match self.fallback {
                Fallback::PassThrough => Ok(Admission::Anonymous),
                Fallback::Reject => Err(GateError::Unauthenticated),
            },
        }
    }

    async fn renew(&self, refresh: &str) -> Result<Admission, GateError> {
        let access = self.tokens.renew(refresh).await.inspect_err(|err| {
            warn!(error = %err, "token renewal failed");
        })?;

        let verification = self.tokens.verify(&access.value).await?;

        match access_identity(&verification) {
            Some(identity) => {
                debug!(subject = %identity.subject, "access token renewed");
                Ok(Admission::Renewed { identity, access })
            }
            None => {
                warn!(?verification, "renewed access token did not verify");
                Err(GateError::RenewalRejected)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

// Refresh tokens are never accepted as the primary credential.
fn access_identity(verification: &Verification) -> Option<AuthenticatedIdentity> {
    match verification {
        Verification::Valid { subject, claims } if claims.kind == TokenKind::Access => {
            Some(AuthenticatedIdentity {
                subject: subject.to_owned(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::token::TokenPair;
    use crate::services::token::TokenServiceImpl;
    use crate::tests::utils::tokens::{expired_pair, stale_pair, token_service};

    use rstest::*;

    fn gate(tokens: TokenServiceImpl, fallback: Fallback) -> AuthGate {
        AuthGate::new(
            Arc::new(tokens),
            PublicRoutes::new(["/", "/auth/local/signin"]),
            fallback,
        )
    }

    fn identity(subject: &str) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            subject: subject.to_string(),
        }
    }

    async fn fresh_pair(tokens: &TokenServiceImpl) -> TokenPair {
        tokens.issue("u1").await.unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_public_route_skips_tokens(token_service: TokenServiceImpl) {
        let gate = gate(token_service, Fallback::Reject);

        let admission = gate
            .admit(
                "/auth/local/signin",
                Credentials {
                    access: Some("garbage"),
                    refresh: Some("garbage"),
                },
            )
            .await;

        assert_eq!(admission, Ok(Admission::Public));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::blank(Some("  "))]
    #[tokio::test]
    async fn test_missing_token(token_service: TokenServiceImpl, #[case] access: Option<&str>) {
        let gate = gate(token_service, Fallback::PassThrough);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access,
                    refresh: None,
                },
            )
            .await;

        assert_eq!(admission, Err(GateError::MissingToken));
    }

    #[rstest]
    #[tokio::test]
    async fn test_valid_access_token(token_service: TokenServiceImpl) {
        let pair = fresh_pair(&token_service).await;
        let gate = gate(token_service, Fallback::Reject);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some(&pair.access.value),
                    refresh: Some(&pair.refresh.value),
                },
            )
            .await;

        assert_eq!(admission, Ok(Admission::Verified(identity("u1"))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_expired_access_is_renewed(token_service: TokenServiceImpl) {
        let pair = stale_pair(&token_service, "u1").await;
        let gate = gate(token_service, Fallback::Reject);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some(&pair.access.value),
                    refresh: Some(&pair.refresh.value),
                },
            )
            .await
            .unwrap();

        match admission {
            Admission::Renewed { identity: renewed, access } => {
                assert_eq!(renewed, identity("u1"));
                assert_ne!(access.value, pair.access.value);
            }
            other => panic!("expected a renewal, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_malformed_access_is_renewed(token_service: TokenServiceImpl) {
        let pair = fresh_pair(&token_service).await;
        let gate = gate(token_service, Fallback::Reject);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some("not-a-token"),
                    refresh: Some(&pair.refresh.value),
                },
            )
            .await
            .unwrap();

        assert_eq!(admission.identity(), Some(&identity("u1")));
    }

    #[rstest]
    #[tokio::test]
    async fn test_expired_refresh_is_terminal(token_service: TokenServiceImpl) {
        let pair = expired_pair(&token_service, "u1").await;
        let gate = gate(token_service, Fallback::PassThrough);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some(&pair.access.value),
                    refresh: Some(&pair.refresh.value),
                },
            )
            .await;

        assert_eq!(
            admission,
            Err(GateError::Token(TokenError::ExpiredOrInvalidRefresh))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_refresh_token_is_not_an_access_token(token_service: TokenServiceImpl) {
        let pair = fresh_pair(&token_service).await;
        let gate = gate(token_service, Fallback::Reject);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some(&pair.refresh.value),
                    refresh: None,
                },
            )
            .await;

        assert_eq!(admission, Err(GateError::Unauthenticated));
    }

    #[rstest]
    #[case::pass_through(Fallback::PassThrough, Ok(Admission::Anonymous))]
    #[case::reject(Fallback::Reject, Err(GateError::Unauthenticated))]
    #[tokio::test]
    async fn test_invalid_access_without_refresh(
        token_service: TokenServiceImpl,
        #[case] fallback: Fallback,
        #[case] expected: Result<Admission, GateError>,
    ) {
        let pair = stale_pair(&token_service, "u1").await;
        let gate = gate(token_service, fallback);

        let admission = gate
            .admit(
                "/auth/currentuser",
                Credentials {
                    access: Some(&pair.access.value),
                    refresh: None,
                },
            )
            .await;

        assert_eq!(admission, expected);
    }

    #[test]
    fn test_gate_errors_share_one_response_shape() {
        for error in [
            GateError::MissingToken,
            GateError::Unauthenticated,
            GateError::RenewalRejected,
            GateError::Token(TokenError::ExpiredOrInvalidRefresh),
        ] {
            let app_error = AppError::from(error);
            assert_eq!(app_error.code, 401);
            assert_eq!(app_error.message, AppError::Unauthorized().message);
        }
    }
}
