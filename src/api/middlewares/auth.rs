use std::ops::Deref;

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};

use crate::api::cookies::{ACCESS_COOKIE, CookieSettings, REFRESH_COOKIE};
use crate::domain::error::AppError;
use crate::domain::models::auth::{Admission, AuthenticatedIdentity};
use crate::services::auth_gate::{AuthGate, Credentials};

/// Identity attached by [`authenticate`]. Handlers taking this extractor
/// answer 401 when the request was admitted without one.
#[derive(Debug)]
pub struct Identity(pub AuthenticatedIdentity);

impl Deref for Identity {
    type Target = AuthenticatedIdentity;

    fn deref(&self) -> &AuthenticatedIdentity {
        &self.0
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Identity, AppError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedIdentity>()
                .cloned()
                .map(Identity)
                .ok_or_else(|| AppError::Unauthorized().trace("no identity attached")),
        )
    }
}

fn access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_COOKIE).filter(|c| !c.value().is_empty()) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn refresh_token(req: &ServiceRequest) -> Option<String> {
    req.cookie(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Admits or rejects each request through the [`AuthGate`], attaching the
/// verified identity and re-setting the `access` cookie after a renewal.
pub async fn authenticate<B: MessageBody + 'static>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    let Some(gate) = req.app_data::<web::Data<AuthGate>>().cloned() else {
        let error = AppError::InternalError().trace("AuthGate is not defined");
        return Ok(req.error_response(error).map_into_right_body());
    };

    let cookies = req
        .app_data::<web::Data<CookieSettings>>()
        .map(|settings| ***settings)
        .unwrap_or_default();

    let access = access_token(&req);
    let refresh = refresh_token(&req);

    let credentials = Credentials {
        access: access.as_deref(),
        refresh: refresh.as_deref(),
    };

    let admission = match gate.admit(req.path(), credentials).await {
        Ok(admission) => admission,
        Err(error) => {
            return Ok(req.error_response(AppError::from(error)).map_into_right_body());
        }
    };

    if let Some(identity) = admission.identity() {
        req.extensions_mut().insert(identity.clone());
    }

    let mut res = next.call(req).await?;

    if let Admission::Renewed { access, .. } = &admission {
        res.response_mut()
            .add_cookie(&cookies.access(access))
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;
    }

    Ok(res.map_into_left_body())
}
