use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::Fallback;
use crate::domain::models::token::TokenLifetimes;
use crate::domain::services::token::TokenError;

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub surrealdb: SurrealDbConfig,
    pub jsonwebtoken: JsonWebTokenConfig,
    pub auth: AuthConfig,
    pub mailer: MailerConfig,
}

/// Signing secret and token lifetimes, in seconds.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct JsonWebTokenConfig {
    pub secret: String,
    pub access_ttl: i64,
    pub refresh_ttl: i64,
}

impl JsonWebTokenConfig {
    /// Both lifetimes must be positive and the refresh token must not
    /// expire before the access token it renews.
    pub fn lifetimes(&self) -> Result<TokenLifetimes, TokenError> {
        if self.access_ttl <= 0 || self.refresh_ttl < self.access_ttl {
            return Err(TokenError::SigningConfiguration(format!(
                "invalid token lifetimes: access_ttl={}s, refresh_ttl={}s",
                self.access_ttl, self.refresh_ttl
            )));
        }

        Ok(TokenLifetimes::from_secs(self.access_ttl, self.refresh_ttl))
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    pub public_routes: Vec<String>,
    pub fallback: Fallback,
    pub secure_cookies: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: String,
    pub otlp: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct MailerConfig {
    pub reset_url: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SurrealDbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub migration: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            service: ServiceConfig {
                name: "surreal-session".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                otlp: false,
            },
            jsonwebtoken: JsonWebTokenConfig {
                secret: String::new(),
                access_ttl: 60,
                refresh_ttl: 600,
            },
            auth: AuthConfig {
                public_routes: [
                    "/",
                    "/auth/local/signup",
                    "/auth/local/signin",
                    "/auth/local/forgot-password",
                    "/auth/local/reset-password/*",
                    "/swagger-ui/*",
                    "/api-docs/*",
                ]
                .map(String::from)
                .to_vec(),
                fallback: Fallback::PassThrough,
                secure_cookies: false,
            },
            mailer: MailerConfig {
                reset_url: "http://localhost:8080/auth/local/reset-password".to_string(),
            },
            surrealdb: SurrealDbConfig {
                host: "localhost".to_string(),
                port: 8000,
                username: "root".to_string(),
                password: "root".to_string(),
                namespace: "test".to_string(),
                database: "test".to_string(),
                migration: true,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file(format!(
                "config/{}.toml",
                std::env::var("RUST_ENV").unwrap_or("development".to_string())
            )))
            .merge(Env::prefixed("APP_").split("__"))
    }
}
