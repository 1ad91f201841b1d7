//! Session cookie attributes
//!
//! Building `Set-Cookie` values and reading a named cookie back from a
//! request's `Cookie` header.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue, header, header::InvalidHeaderValue};

/// SameSite policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of the session cookie
///
/// The cookie is always `HttpOnly` and scoped to `/`.
/// `Secure` is controlled by [`CookieAttributes::secure`] so plain-HTTP
/// development still works.
#[derive(Debug, Clone)]
pub struct CookieAttributes {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age: Duration,
}

impl CookieAttributes {
    pub fn new(name: impl Into<String>, max_age: Duration) -> Self {
        Self {
            name: name.into(),
            secure: true,
            same_site: SameSite::Lax,
            max_age,
        }
    }

    /// `Set-Cookie` value carrying `value`
    pub fn set_cookie(&self, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={}; HttpOnly; Path=/; SameSite={}; Max-Age={}",
            self.name,
            value,
            self.same_site.as_str(),
            self.max_age.as_secs()
        );
        if self.secure || self.same_site == SameSite::None {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn clear_cookie(&self) -> HeaderValue {
        let mut cookie = format!(
            "{}=; HttpOnly; Path=/; SameSite={}; Max-Age=0",
            self.name,
            self.same_site.as_str()
        );
        if self.secure || self.same_site == SameSite::None {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

/// Find a cookie by name across all `Cookie` headers
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then_some(value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> CookieAttributes {
        CookieAttributes::new("auth_session", Duration::from_secs(86_400))
    }

    #[test]
    fn test_set_cookie_attributes() {
        let cookie = attributes().set_cookie("abc.def").unwrap();
        let cookie = cookie.to_str().unwrap();

        assert!(cookie.starts_with("auth_session=abc.def;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_insecure_cookie_for_plain_http() {
        let mut attributes = attributes();
        attributes.secure = false;
        let cookie = attributes.set_cookie("v").unwrap();
        assert!(!cookie.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let mut attributes = attributes();
        attributes.secure = false;
        attributes.same_site = SameSite::None;
        let cookie = attributes.set_cookie("v").unwrap();
        assert!(cookie.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = attributes().clear_cookie();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("auth_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_set_cookie_rejects_header_breaking_value() {
        assert!(attributes().set_cookie("a\nb").is_err());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; auth_session=abc123; empty="),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("other=xyz"));

        assert_eq!(extract_cookie(&headers, "auth_session"), Some("abc123"));
        assert_eq!(extract_cookie(&headers, "other"), Some("xyz"));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
