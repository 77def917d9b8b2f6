//! Replaying an upstream response to an inbound caller.
//!
//! The upstream `Set-Cookie` headers are never forwarded verbatim. Each cookie is re-issued
//! with only its name and value and a fixed lifetime counted from the replay time.

use std::time::SystemTime;

use http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode};

use crate::cookie::{self, Cookie, Duration};

/// Lifetime of re-issued cookies.
pub const REPLAY_COOKIE_LIFETIME: Duration = Duration::hours(24);

/// The status, headers and cookies to send back to an inbound caller.
#[derive(Debug, Clone)]
pub struct ResponseReplay {
    status: StatusCode,
    headers: HeaderMap,
    cookies: Vec<Cookie<'static>>,
}

impl ResponseReplay {
    /// Builds a replay from an upstream status, its headers and the cookies it set.
    ///
    /// Every `Set-Cookie` entry is removed from `headers`; the cookies are re-issued with an
    /// expiry of `now` plus [`REPLAY_COOKIE_LIFETIME`].
    pub fn new<'a, I>(status: StatusCode, headers: &HeaderMap, cookies: I, now: SystemTime) -> Self
    where
        I: IntoIterator<Item = Cookie<'a>>,
    {
        let mut replay_headers = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            if is_set_cookie(name.as_str()) {
                continue;
            }
            replay_headers.append(name.clone(), value.clone());
        }

        let cookies = cookies
            .into_iter()
            .map(|cookie| cookie.reissue(now, REPLAY_COOKIE_LIFETIME))
            .collect();

        ResponseReplay {
            status,
            headers: replay_headers,
            cookies,
        }
    }

    /// Like [`ResponseReplay::new`], taking the cookies from the `Set-Cookie` headers.
    ///
    /// Values that do not parse as cookies are dropped.
    pub fn from_response(status: StatusCode, headers: &HeaderMap, now: SystemTime) -> Self {
        let cookies = cookie::extract_response_cookies(headers);
        Self::new(status, headers, cookies, now)
    }

    /// Upstream status code.
    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Upstream headers, without any `Set-Cookie`.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Re-issued cookies, in upstream order.
    #[inline]
    pub fn cookies(&self) -> &[Cookie<'static>] {
        &self.cookies
    }

    /// The full header block to send: the upstream headers followed by one `Set-Cookie`
    /// per re-issued cookie.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        for cookie in &self.cookies {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(err) => log::debug!("skipping cookie {}: {}", cookie.name(), err),
            }
        }
        headers
    }
}

fn is_set_cookie(name: &str) -> bool {
    let compact: String = name.chars().filter(|c| *c != ' ').collect();
    compact.eq_ignore_ascii_case(SET_COOKIE.as_str())
}
