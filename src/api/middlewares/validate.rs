use core::fmt::Debug;
use std::ops::Deref;

use crate::domain::error::AppError;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::{JsonBody, Payload};
use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;
use validator::Validate;

const PAYLOAD_LIMIT: usize = 32 * 1024;

/// JSON body that is deserialized and then validated; deserialization
/// failures answer 400, validation failures 422.
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for Json<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    #[inline]
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        JsonBody::new(
            req,
            payload,
            Some(&|mime| mime == mime::APPLICATION_JSON),
            true,
        )
        .limit(PAYLOAD_LIMIT)
        .map(|res: Result<T, _>| match res {
            Ok(payload) => payload
                .validate()
                .map(|_| Json(payload))
                .map_err(AppError::from),
            Err(err) => Err(AppError::from(err)),
        })
        .boxed_local()
    }
}
