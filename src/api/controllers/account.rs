use std::sync::Arc;

use crate::api::cookies::CookieSettings;
use crate::api::error::ApiResult;
use crate::api::middlewares::auth::Identity;
use crate::api::middlewares::validate::Json;
use crate::domain::error::AppError;
use crate::domain::models::account::PasswordReset;
use crate::domain::services::account::AccountService;
use crate::domain::services::token::TokenService;

use crate::api::dto::account::{
    AccessTokenDTO, AccountDTO, CreateAccountDTO, CredentialsDTO, ForgotPasswordDTO, MessageDTO,
    ResetPasswordDTO,
};

use actix_web::{
    HttpResponse, get, post,
    web::{Data as State, Path},
};

use utoipa_actix_web::service_config::ServiceConfig;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(signup)
        .service(signin)
        .service(current_user)
        .service(forgot_password)
        .service(reset_password);
}

#[utoipa::path(
    responses(
        (status = 201, body = AccountDTO, description = "Account Created"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 409, body = AppError, example = json!(AppError::example_409())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = CreateAccountDTO,
    tag = "Account",
)]
#[post("/local/signup")]
pub async fn signup(
    payload: Json<CreateAccountDTO>,
    account_service: State<Arc<dyn AccountService>>,
    token_service: State<Arc<dyn TokenService>>,
    cookies: State<CookieSettings>,
) -> ApiResult {
    let account_dto = payload.into_inner();

    let created_account = account_service.signup(account_dto.into()).await?;

    let pair = token_service.issue(&created_account.id).await?;

    Ok(HttpResponse::Created()
        .cookie(cookies.access(&pair.access))
        .cookie(cookies.refresh(&pair.refresh))
        .json(AccountDTO::from(created_account)))
}

#[utoipa::path(
    responses(
        (status = 202, body = AccessTokenDTO),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = CredentialsDTO,
    tag = "Account"
)]
#[post("/local/signin")]
pub async fn signin(
    payload: Json<CredentialsDTO>,
    account_service: State<Arc<dyn AccountService>>,
    token_service: State<Arc<dyn TokenService>>,
    cookies: State<CookieSettings>,
) -> ApiResult {
    let credentials_dto = payload.into_inner();

    let account = account_service.signin(credentials_dto.into()).await?;

    let pair = token_service.issue(&account.id).await?;

    Ok(HttpResponse::Accepted()
        .cookie(cookies.access(&pair.access))
        .cookie(cookies.refresh(&pair.refresh))
        .json(AccessTokenDTO::from(&pair.access)))
}

#[utoipa::path(
    responses(
        (status = 200, body = AccountDTO),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("jsonwebtoken" = []), ("access_cookie" = [])),
    tag = "Account"
)]
#[get("/currentuser")]
pub async fn current_user(
    identity: Identity,
    account_service: State<Arc<dyn AccountService>>,
) -> ApiResult {
    let account = account_service
        .find_by_id(&identity.subject)
        .await?
        .ok_or_else(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(AccountDTO::from(account)))
}

#[utoipa::path(
    responses(
        (status = 200, body = MessageDTO),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = ForgotPasswordDTO,
    tag = "Account"
)]
#[post("/local/forgot-password")]
pub async fn forgot_password(
    payload: Json<ForgotPasswordDTO>,
    account_service: State<Arc<dyn AccountService>>,
) -> ApiResult {
    account_service
        .request_password_reset(&payload.email)
        .await?;

    Ok(HttpResponse::Ok().json(MessageDTO::new("Reset password link sent to your email")))
}

#[utoipa::path(
    params(
        ("user_id" = String, Path, description = "Account the reset link was issued for"),
        ("token" = String, Path, description = "Reset code from the link")
    ),
    responses(
        (status = 202, body = MessageDTO),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = ResetPasswordDTO,
    tag = "Account"
)]
#[post("/local/reset-password/{user_id}/{token}")]
pub async fn reset_password(
    path: Path<(String, String)>,
    payload: Json<ResetPasswordDTO>,
    account_service: State<Arc<dyn AccountService>>,
) -> ApiResult {
    let (account_id, code) = path.into_inner();

    account_service
        .reset_password(PasswordReset {
            account_id,
            code,
            password: payload.into_inner().password,
        })
        .await?;

    Ok(HttpResponse::Accepted().json(MessageDTO::new("Password updated")))
}
