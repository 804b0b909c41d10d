//! Extract request cookies and apply the shared-credential gate.

use crate::config::ApiLogin;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use std::collections::HashMap;

pub const USERNAME_COOKIE: &str = "username";
pub const PASSWORD_COOKIE: &str = "password";

/// Cookies of one request by name; a repeated name keeps its last value.
#[derive(Clone, Debug, Default)]
pub struct Cookies(pub HashMap<String, String>);

impl Cookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut map = HashMap::new();
        for value in headers.get_all(COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            for pair in raw.split(';') {
                if let Some((name, val)) = pair.split_once('=') {
                    map.insert(name.trim().to_string(), val.trim().to_string());
                }
            }
        }
        Cookies(map)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// With a login configured, both cookies must match exactly; otherwise NotFound.
    pub fn authorize(&self, login: Option<&ApiLogin>) -> Result<(), AppError> {
        let Some(login) = login else {
            return Ok(());
        };
        if self.get(USERNAME_COOKIE) == Some(login.username.as_str())
            && self.get(PASSWORD_COOKIE) == Some(login.password.as_str())
        {
            Ok(())
        } else {
            tracing::warn!("credential cookies missing or wrong");
            Err(AppError::not_found("credential gate"))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Cookies
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Cookies::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn login() -> ApiLogin {
        ApiLogin {
            username: "admin".into(),
            password: "s3cret".into(),
        }
    }

    fn cookies(raw: &str) -> Cookies {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(raw).unwrap());
        Cookies::from_headers(&headers)
    }

    #[test]
    fn parses_cookie_header() {
        let c = cookies("username=admin; password=s3cret; theme=dark");
        assert_eq!(c.get("theme"), Some("dark"));
    }

    #[test]
    fn gate_open_without_login() {
        assert!(Cookies::default().authorize(None).is_ok());
    }

    #[test]
    fn gate_requires_both_cookies() {
        let l = login();
        assert!(cookies("username=admin; password=s3cret").authorize(Some(&l)).is_ok());
        assert!(cookies("username=admin; password=nope").authorize(Some(&l)).is_err());
        assert!(cookies("username=admin").authorize(Some(&l)).is_err());
        assert!(Cookies::default().authorize(Some(&l)).is_err());
    }
}
