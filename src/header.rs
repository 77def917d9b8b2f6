//! Request header shaping
//!
//! Headers arrive as a flat map and leave as an [`OrderedHeaders`] list that carries two
//! synthetic entries for the transport: [`HEADER_ORDER_KEY`] lists the regular header order
//! and [`PSEUDO_HEADER_ORDER_KEY`] lists the pseudo-header order.

use std::collections::BTreeMap;

use http::{header::CONTENT_LENGTH, HeaderMap};
use url::Url;

use crate::http2::DEFAULT_PSEUDO_ORDER;

/// Synthetic entry carrying the regular header order.
pub const HEADER_ORDER_KEY: &str = "Header-Order:";

/// Synthetic entry carrying the pseudo-header order.
pub const PSEUDO_HEADER_ORDER_KEY: &str = "PHeader-Order:";

/// Prefix of internal control headers that must never reach the wire.
pub const DEFAULT_INTERNAL_PREFIX: &str = "x-kc-";

/// A flat header set: one value per name, names kept in their original case.
pub type FlatHeaders = BTreeMap<String, String>;

/// An ordered header list where each name carries one or more values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHeaders(Vec<(String, Vec<String>)>);

// ===== impl OrderedHeaders =====

impl OrderedHeaders {
    /// Creates a new, empty list.
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Copies a [`HeaderMap`], keeping every value. Values that are not valid UTF-8 are
    /// converted lossily.
    pub fn from_header_map(map: &HeaderMap) -> Self {
        let mut headers = OrderedHeaders::new();
        for (name, value) in map {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        headers
    }

    /// Appends a value, adding the name at the end if it is new.
    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.0.push((name, vec![value.into()])),
        }
    }

    /// Sets all values of a name, replacing earlier ones in place.
    pub fn insert<N>(&mut self, name: N, values: Vec<String>)
    where
        N: Into<String>,
    {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.0.push((name, values)),
        }
    }

    /// All values of `name`, matched exactly.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns the number of names.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over names and their values in order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Consumes the list, returning its entries.
    #[inline]
    pub fn into_inner(self) -> Vec<(String, Vec<String>)> {
        self.0
    }
}

impl From<Vec<(String, Vec<String>)>> for OrderedHeaders {
    fn from(entries: Vec<(String, Vec<String>)>) -> Self {
        let mut headers = OrderedHeaders::new();
        for (name, values) in entries {
            for value in values {
                headers.append(name.clone(), value);
            }
        }
        headers
    }
}

/// Collapses an ordered list into a flat map.
///
/// This is lossy: when a name has several values only the last one is kept, and names
/// without values are dropped.
pub fn flatten(headers: &OrderedHeaders) -> FlatHeaders {
    headers
        .iter()
        .filter_map(|(name, values)| values.last().map(|v| (name.to_owned(), v.clone())))
        .collect()
}

/// The `host[:port]` part of `url`.
///
/// This is the normalized authority, not the raw segment between the second and third
/// `/`: userinfo is dropped and so is a port equal to the scheme default, so
/// `https://user@example.com:443/` yields `example.com`.
///
/// URLs that do not parse fall back to the third `/` separated segment, so
/// `"//example.com/x"` still yields `example.com`.
pub fn target_authority(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(|host| match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_owned(),
        }),
        Err(_) => url
            .split('/')
            .nth(2)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned),
    }
}

/// Prepares caller headers for the wire.
///
/// Any header whose name contains `host` (case-insensitive) takes the authority of
/// `target_url`. Headers whose lowercased name, with spaces removed, starts with
/// `internal_prefix` are dropped. Everything else is kept as-is.
pub fn sanitize(headers: &FlatHeaders, target_url: &str, internal_prefix: &str) -> FlatHeaders {
    let authority = target_authority(target_url);
    let prefix = internal_prefix.to_ascii_lowercase();
    let mut out = FlatHeaders::new();

    for (name, value) in headers {
        let lowered = name.to_ascii_lowercase();

        if lowered.contains("host") {
            let value = match &authority {
                Some(authority) => authority.clone(),
                None => {
                    log::debug!("no authority in {:?}, keeping {} header", target_url, name);
                    value.clone()
                }
            };
            out.insert(name.clone(), value);
            continue;
        }

        let compact: String = lowered.chars().filter(|c| *c != ' ').collect();
        if !prefix.is_empty() && compact.starts_with(&prefix) {
            log::trace!("dropping internal header {}", name);
            continue;
        }

        out.insert(name.clone(), value.clone());
    }

    out
}

/// Expands a flat map into the ordered form handed to the transport.
///
/// `Content-Length` is dropped in any casing. A header-order hint with more than one entry is
/// emitted under [`HEADER_ORDER_KEY`]. The pseudo-header order is always emitted under
/// [`PSEUDO_HEADER_ORDER_KEY`], from the hint when it has more than one entry and otherwise
/// as `:method, :authority, :scheme, :path`.
pub fn to_ordered<H, P>(
    headers: &FlatHeaders,
    header_order_hint: &[H],
    pseudo_order_hint: &[P],
) -> OrderedHeaders
where
    H: AsRef<str>,
    P: AsRef<str>,
{
    let mut out = OrderedHeaders::new();

    for (name, value) in headers {
        if name.trim().eq_ignore_ascii_case(CONTENT_LENGTH.as_str()) {
            continue;
        }
        out.insert(name.clone(), vec![value.clone()]);
    }

    if header_order_hint.len() > 1 {
        out.insert(HEADER_ORDER_KEY, strip_whitespace(header_order_hint));
    }

    let pseudo_order = if pseudo_order_hint.len() > 1 {
        strip_whitespace(pseudo_order_hint)
    } else {
        DEFAULT_PSEUDO_ORDER
            .iter()
            .map(|id| id.as_str().to_owned())
            .collect()
    };
    out.insert(PSEUDO_HEADER_ORDER_KEY, pseudo_order);

    out
}

fn strip_whitespace<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
        .collect()
}
