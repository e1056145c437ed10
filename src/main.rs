mod api;
mod app;
mod config;
mod container;
mod domain;
mod infrastructure;
mod services;
mod telemetry;

use config::AppConfig;
use container::{Container, Repositories};
use domain::services::token::TokenError;
use infrastructure::databases::surrealdb;
use services::mailer::LogMailer;
use services::token::{SigningKey, TokenServiceImpl};

use actix_web::HttpServer;
use include_dir::{Dir, include_dir};
use std::sync::Arc;
use surrealdb_migrations::MigrationRunner;
use thiserror::Error;
use tracing::info;

#[cfg(test)]
mod tests;

const MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/migration");

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Database(#[from] ::surrealdb::Error),
    #[error(transparent)]
    Configuration(#[from] figment::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Migration(String),
    #[error(transparent)]
    Telemetry(#[from] telemetry::TelemetryError),
    #[error(transparent)]
    Signing(#[from] TokenError),
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;

    let provider = telemetry::configure(&config.service, &config.logging)?;

    let key = SigningKey::from_secret(config.jsonwebtoken.secret.as_bytes())?;
    let lifetimes = config.jsonwebtoken.lifetimes()?;
    let token_service = Arc::new(TokenServiceImpl::new(key, lifetimes));

    let conn = surrealdb::connect(&config.surrealdb).await?;

    if config.surrealdb.migration {
        MigrationRunner::new(&conn)
            .load_files(&MIGRATIONS_DIR)
            .up()
            .await
            .map_err(|err| StartupError::Migration(err.to_string()))?;
    }

    let container = Arc::new(Container::new(
        Repositories::surrealdb(conn),
        token_service,
        Arc::new(LogMailer::new(config.mailer.reset_url.as_str())),
        &config.auth,
    ));

    info!(host = %config.server.host, port = config.server.port, "listening");

    HttpServer::new(move || app::create(Arc::clone(&container)))
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await?;

    telemetry::shutdown(provider)?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        panic!("{err}");
    }
}
