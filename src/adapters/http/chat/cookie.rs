//! Session cookie helpers.
//!
//! The cookie value is a bare session UUID. Anything unparseable is
//! treated as no cookie at all.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::domain::foundation::SessionKey;

/// Cookie name, lifetime and flags.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            name: "webdoctor_session".to_string(),
            max_age_secs: 3600,
            secure: false,
        }
    }
}

impl SessionCookie {
    /// Reads the session key from the request's `Cookie` headers.
    pub fn read(&self, headers: &HeaderMap) -> Option<SessionKey> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    /// Builds the `Set-Cookie` value for a session.
    pub fn issue(&self, key: &SessionKey) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, key, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_key_among_other_cookies() {
        let key = SessionKey::new();
        let cookie = SessionCookie::default();

        let found = cookie.read(&headers(&format!("theme=dark; webdoctor_session={}; x=1", key)));

        assert_eq!(found, Some(key));
    }

    #[test]
    fn ignores_malformed_or_missing_cookie() {
        let cookie = SessionCookie::default();
        assert_eq!(cookie.read(&headers("webdoctor_session=not-a-uuid")), None);
        assert_eq!(cookie.read(&headers("other=1")), None);
        assert_eq!(cookie.read(&HeaderMap::new()), None);
    }

    #[test]
    fn issued_cookie_carries_flags() {
        let key = SessionKey::new();
        let cookie = SessionCookie {
            secure: true,
            ..Default::default()
        };

        let value = cookie.issue(&key).unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with(&format!("webdoctor_session={};", key)));
        assert!(value.contains("Max-Age=3600"));
        assert!(value.contains("HttpOnly"));
        assert!(value.ends_with("; Secure"));
    }

    #[test]
    fn issued_cookie_round_trips_through_read() {
        let key = SessionKey::new();
        let cookie = SessionCookie::default();
        let set = cookie.issue(&key).unwrap();
        let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();

        assert_eq!(cookie.read(&headers(&pair)), Some(key));
    }
}
