use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Distinguishes the two tokens of a pair. Only refresh tokens may be
/// exchanged for a new access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub kind: TokenKind,
}

/// A signed token together with the timestamps encoded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}

/// Outcome of a single verification attempt.
///
/// `Invalid` never carries claims: a payload that failed verification is
/// never exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid { subject: String, claims: Claims },
    Invalid { expired: bool },
}

impl Verification {
    pub fn subject(&self) -> Option<&str> {
        match self {
            Verification::Valid { subject, .. } => Some(subject),
            Verification::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl TokenLifetimes {
    pub fn from_secs(access: i64, refresh: i64) -> Self {
        TokenLifetimes {
            access: Duration::seconds(access),
            refresh: Duration::seconds(refresh),
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        TokenLifetimes {
            access: Duration::minutes(1),
            refresh: Duration::minutes(10),
        }
    }
}
