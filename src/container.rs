use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::api::cookies::CookieSettings;
use crate::config::AuthConfig;
use crate::domain::models::auth::PublicRoutes;
use crate::domain::repositories::account::AccountRepository;
use crate::domain::repositories::reset_code::ResetCodeRepository;
use crate::domain::services::account::AccountService;
use crate::domain::services::mailer::Mailer;
use crate::domain::services::token::TokenService;

use crate::services::account::AccountServiceImpl;
use crate::services::auth_gate::AuthGate;

use crate::infrastructure::repositories::account::AccountRepositoryImpl;
use crate::infrastructure::repositories::reset_code::ResetCodeRepositoryImpl;

pub struct Container {
    pub account_service: Arc<dyn AccountService>,
    pub token_service: Arc<dyn TokenService>,
    pub auth_gate: AuthGate,
    pub cookies: CookieSettings,
}

/// Storage-side collaborators of the account service.
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub reset_codes: Arc<dyn ResetCodeRepository>,
}

impl Repositories {
    pub fn surrealdb(conn: Surreal<Client>) -> Self {
        let db = Arc::new(conn);

        Repositories {
            accounts: Arc::new(AccountRepositoryImpl::new(db.clone())),
            reset_codes: Arc::new(ResetCodeRepositoryImpl::new(db)),
        }
    }
}

impl Container {
    pub fn new(
        repositories: Repositories,
        token_service: Arc<dyn TokenService>,
        mailer: Arc<dyn Mailer>,
        auth: &AuthConfig,
    ) -> Self {
        Container {
            account_service: account_service(repositories, mailer),
            auth_gate: auth_gate(token_service.clone(), auth),
            token_service,
            cookies: CookieSettings {
                secure: auth.secure_cookies,
            },
        }
    }
}

fn account_service(repositories: Repositories, mailer: Arc<dyn Mailer>) -> Arc<dyn AccountService> {
    Arc::new(AccountServiceImpl::new(
        repositories.accounts,
        repositories.reset_codes,
        mailer,
    ))
}

fn auth_gate(token_service: Arc<dyn TokenService>, auth: &AuthConfig) -> AuthGate {
    AuthGate::new(
        token_service,
        PublicRoutes::new(auth.public_routes.iter().cloned()),
        auth.fallback,
    )
}
