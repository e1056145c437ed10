
pub mod utils;

use ::surrealdb::{Surreal, engine::remote::ws::Client};

use std::sync::Arc;

use serde::Deserialize;
use surrealdb_migrations::MigrationRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::{
    surrealdb::{SURREALDB_PORT, SurrealDb},
    testcontainers::runners::AsyncRunner,
};

use crate::container::Repositories;
use crate::services::mailer::mock::MailerImpl;
use crate::tests::utils::tokens::token_service;
use crate::{MIGRATIONS_DIR, infrastructure::databases::surrealdb};
use crate::{config::AppConfig, container::Container};

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test::TestRequest,
};

use serde_json::json;

use rstest::*;

struct Database {
    pub connection: Surreal<Client>,
    pub container: ContainerAsync<SurrealDb>,
}

pub struct TestContext {
    pub db: Database,
    pub container: Arc<Container>,
    pub mailer: Arc<MailerImpl>,
}

#[fixture]
async fn context() -> TestContext {
    let db_container = SurrealDb::default()
        .with_tag("latest")
        .start()
        .await
        .unwrap();

    let mut config = AppConfig::load().unwrap();

    config.surrealdb.port = db_container
        .get_host_port_ipv4(SURREALDB_PORT)
        .await
        .unwrap();

    let db_connection = surrealdb::connect(&config.surrealdb).await.unwrap();

    let _ = MigrationRunner::new(&db_connection)
        .load_files(&MIGRATIONS_DIR)
        .up()
        .await;

    let db = Database {
        connection: db_connection.clone(),
        container: db_container,
    };

    let mailer = Arc::new(MailerImpl::default());

    let container = Arc::new(Container::new(
        Repositories::surrealdb(db_connection),
        Arc::new(token_service()),
        mailer.clone(),
        &config.auth,
    ));

    TestContext {
        db,
        container,
        mailer,
    }
}

/// Signs in and returns the cookies the server set, access first.
async fn request_cookies<S, B>(app: &S, email: &str, password: &str) -> Vec<Cookie<'static>>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = TestRequest::post()
        .uri("/auth/local/signin")
        .set_json(json!({
            "email": email,
            "password": password,
        }))
        .send_request(app)
        .await;

    res.response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect()
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Error {
    code: u16,
    message: String,
}
