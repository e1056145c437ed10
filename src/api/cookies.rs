use actix_web::cookie::{Cookie, SameSite, time::Duration};

use crate::domain::models::token::Token;

pub const ACCESS_COOKIE: &str = "access";
pub const REFRESH_COOKIE: &str = "refresh";

// Cookie lifetimes are fixed and independent of the token expiry claims.
const ACCESS_MAX_AGE: Duration = Duration::seconds(60);
const REFRESH_MAX_AGE: Duration = Duration::seconds(36_000);

#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    pub fn access<'c>(&self, token: &'c Token) -> Cookie<'c> {
        self.build(ACCESS_COOKIE, &token.value, ACCESS_MAX_AGE)
    }

    pub fn refresh<'c>(&self, token: &'c Token) -> Cookie<'c> {
        self.build(REFRESH_COOKIE, &token.value, REFRESH_MAX_AGE)
    }

    fn build<'c>(&self, name: &'c str, value: &'c str, max_age: Duration) -> Cookie<'c> {
        Cookie::build(name, value)
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .same_site(SameSite::Strict)
            .max_age(max_age)
            .finish()
    }
}
