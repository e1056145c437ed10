use actix_web::{HttpResponse, get};

use crate::api::dto::account::MessageDTO;
use crate::api::error::ApiResult;

#[utoipa::path(
    responses((status = 200, body = MessageDTO)),
    tag = "Root"
)]
#[get("/")]
pub async fn index() -> ApiResult {
    Ok(HttpResponse::Ok().json(MessageDTO::new("Hello World")))
}
