use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub mod cookies;
mod controllers;
mod dto;
mod error;
pub mod middlewares;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(controllers::root::index)
        .service(scope("/auth").configure(controllers::account::routes));
}
