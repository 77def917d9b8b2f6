//! HTTP Cookies

use std::{borrow::Cow, fmt, time::SystemTime};

use http::{header::SET_COOKIE, HeaderMap, HeaderValue};

pub use cookie_crate::{time::Duration, Expiration};

/// A single HTTP cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie<'a>(cookie_crate::Cookie<'a>);

// ===== impl Cookie =====
impl<'a> Cookie<'a> {
    /// Parses a `Set-Cookie` header value.
    pub fn parse(value: &'a HeaderValue) -> Result<Cookie<'a>, CookieParseError> {
        std::str::from_utf8(value.as_bytes())
            .map_err(cookie_crate::ParseError::from)
            .and_then(cookie_crate::Cookie::parse)
            .map_err(CookieParseError)
            .map(Cookie)
    }

    /// Creates a new `Cookie` instance from the given name and value.
    #[inline]
    pub fn new<N, V>(name: N, value: V) -> Cookie<'a>
    where
        N: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        Cookie(cookie_crate::Cookie::new(name, value))
    }

    /// The name of the cookie.
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// The value of the cookie.
    #[inline]
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// The cookie expiration time.
    #[inline]
    pub fn expires(&self) -> Option<SystemTime> {
        match self.0.expires() {
            Some(Expiration::DateTime(offset)) => Some(SystemTime::from(offset)),
            None | Some(Expiration::Session) => None,
        }
    }

    /// Copies only the name and value, expiring `lifetime` after `now`.
    ///
    /// Every other attribute of the original cookie is dropped.
    pub fn reissue(&self, now: SystemTime, lifetime: Duration) -> Cookie<'static> {
        let expires = cookie_crate::time::OffsetDateTime::from(now) + lifetime;
        Cookie(
            cookie_crate::Cookie::build((self.name().to_owned(), self.value().to_owned()))
                .expires(expires)
                .build(),
        )
    }

    /// Converts `self` into a `Cookie` with a static lifetime with as few
    /// allocations as possible.
    #[inline]
    pub fn into_owned(self) -> Cookie<'static> {
        Cookie(self.0.into_owned())
    }
}

impl fmt::Display for Cookie<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parses every `Set-Cookie` header, skipping values that are not valid cookies.
pub(crate) fn extract_response_cookies(headers: &HeaderMap) -> Vec<Cookie<'static>> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| match Cookie::parse(value) {
            Ok(cookie) => Some(cookie.into_owned()),
            Err(err) => {
                log::debug!("skipping invalid Set-Cookie header: {}", err);
                None
            }
        })
        .collect()
}

/// Error representing a parse failure of a 'Set-Cookie' header.
pub struct CookieParseError(cookie_crate::ParseError);

impl fmt::Debug for CookieParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for CookieParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for CookieParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration as StdDuration, UNIX_EPOCH};

    #[test]
    fn parse_set_cookie() {
        let value = HeaderValue::from_static("sid=abc; Path=/; HttpOnly; Secure");
        let cookie = Cookie::parse(&value).unwrap();
        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.value(), "abc");
        assert!(cookie.expires().is_none());

        let rendered = cookie.to_string();
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn parse_invalid() {
        let value = HeaderValue::from_static("no-equals-sign");
        assert!(Cookie::parse(&value).is_err());
    }

    #[test]
    fn reissue_sets_expiry_and_drops_attributes() {
        let value = HeaderValue::from_static("sid=abc; Path=/app; Max-Age=5");
        let cookie = Cookie::parse(&value).unwrap();
        let now = UNIX_EPOCH + StdDuration::from_secs(1_700_000_000);

        let reissued = cookie.reissue(now, Duration::hours(24));
        assert_eq!(reissued.name(), "sid");
        assert_eq!(reissued.value(), "abc");
        let rendered = reissued.to_string();
        assert!(rendered.starts_with("sid=abc; Expires="));
        assert!(!rendered.contains("Path="));
        assert!(!rendered.contains("Max-Age="));
        assert_eq!(
            reissued.expires(),
            Some(now + StdDuration::from_secs(24 * 60 * 60))
        );
    }

    #[test]
    fn extract_skips_invalid() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("broken"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2; Secure"));

        let cookies = extract_response_cookies(&headers);
        let names: Vec<_> = cookies.iter().map(Cookie::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
