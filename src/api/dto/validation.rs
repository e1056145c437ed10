use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

pub fn is_email(email: &str) -> Result<(), ValidationError> {
    if email.len() < 3 || email.len() > 255 {
        return Err(ValidationError::new("0")
            .with_message(Cow::from("Email must contain between 3 and 255 characters")));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("0").with_message(Cow::from("Invalid email format")));
    }

    Ok(())
}

pub fn is_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 6 || password.len() > 72 {
        return Err(ValidationError::new("0").with_message(Cow::from(
            "Password must contain between 6 and 72 characters",
        )));
    }

    Ok(())
}

pub fn is_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("0").with_message(Cow::from("Name is required")));
    }

    Ok(())
}
