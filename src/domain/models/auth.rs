use serde::{Deserialize, Serialize};

use crate::domain::models::token::Token;

/// The subject attached to a request once its credentials were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: String,
}

/// What the gate decided for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The path is public, no token logic ran.
    Public,
    Verified(AuthenticatedIdentity),
    /// The access token was replaced; the new one must be sent back as a cookie.
    Renewed {
        identity: AuthenticatedIdentity,
        access: Token,
    },
    /// Nothing was verified and the fallback policy let the request through.
    Anonymous,
}

impl Admission {
    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            Admission::Verified(identity) | Admission::Renewed { identity, .. } => Some(identity),
            Admission::Public | Admission::Anonymous => None,
        }
    }
}

/// Policy applied when a request carries an invalid access token and no
/// refresh cookie.
///
/// `PassThrough` admits the request without an identity, so every handler
/// that needs one has to require it (see the `Identity` extractor).
/// `Reject` answers 401 right away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    #[default]
    PassThrough,
    Reject,
}

/// Paths that skip authentication entirely.
///
/// Entries are exact paths, or prefixes written as `/prefix/*`.
#[derive(Debug, Clone, Default)]
pub struct PublicRoutes {
    routes: Vec<String>,
}

impl PublicRoutes {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PublicRoutes {
            routes: routes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.iter().any(|route| match route.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('/') => path.starts_with(prefix),
            _ => route == path,
        })
    }
}
