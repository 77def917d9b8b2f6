//! Per-request fingerprint assembly.

use std::borrow::Cow;

use typed_builder::TypedBuilder;

use crate::{
    error::Result,
    header::{self, FlatHeaders, OrderedHeaders, DEFAULT_INTERNAL_PREFIX},
    http2::{ClientProfile, Http2Overrides},
    imp::Impersonate,
    tls::{self, AlpnProtocol, FingerprintSpec},
};

/// Everything known about one outbound request that shapes its fingerprint.
///
/// # Example
///
/// ```rust
/// use fingerprint_emulation::{Emulation, Impersonate};
///
/// let fingerprint = Emulation::builder()
///     .ja3("771,4865-4866,0-23-65281-10-11-16,29-23-24,0")
///     .identity("HelloFirefox_105")
///     .target_url("https://example.com/")
///     .build()
///     .fingerprint()
///     .unwrap();
///
/// assert_eq!(fingerprint.identity, Impersonate::Firefox105);
/// ```
#[derive(TypedBuilder, Debug, Clone)]
pub struct Emulation {
    /// The JA3 string describing the ClientHello.
    #[builder(setter(into))]
    pub ja3: String,

    /// ALPN protocol offered. Accepts the protocol hint, where `"1"` means HTTP/1.1.
    #[builder(default, setter(into))]
    pub protocol: AlpnProtocol,

    /// Client identity; accepts any name [`Impersonate::resolve`] understands.
    #[builder(default, setter(into))]
    pub identity: Impersonate,

    /// Explicit HTTP/2 frames. When set, they replace the identity's profile.
    #[builder(default, setter(strip_option))]
    pub http2_overrides: Option<Http2Overrides>,

    /// Regular header order, emitted when it has more than one entry.
    #[builder(default, setter(into))]
    pub header_order: Vec<String>,

    /// Pseudo-header order. When it has fewer than two entries the profile's order is used.
    #[builder(default, setter(into))]
    pub pseudo_header_order: Vec<String>,

    /// URL the request goes to; its authority replaces any host header.
    #[builder(setter(into))]
    pub target_url: String,

    /// Caller headers, before sanitizing.
    #[builder(default)]
    pub headers: FlatHeaders,

    /// Internal control header prefix.
    #[builder(default = DEFAULT_INTERNAL_PREFIX.to_owned(), setter(into))]
    pub internal_prefix: String,
}

/// The three artifacts handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Fingerprint {
    /// The resolved identity.
    pub identity: Impersonate,
    /// ClientHello template for the TLS engine.
    pub tls: FingerprintSpec,
    /// HTTP/2 profile; borrowed from the registry unless overridden.
    pub http2: Cow<'static, ClientProfile>,
    /// Wire headers including the order entries.
    pub headers: OrderedHeaders,
}

impl Emulation {
    /// Builds the fingerprint. Only a malformed JA3 string fails.
    pub fn fingerprint(&self) -> Result<Fingerprint> {
        let tls = tls::parse(&self.ja3, self.protocol)?;

        let http2 = match &self.http2_overrides {
            Some(overrides) => Cow::Owned(ClientProfile::from_overrides(overrides)),
            None => Cow::Borrowed(self.identity.profile()),
        };

        let sanitized = header::sanitize(&self.headers, &self.target_url, &self.internal_prefix);
        let headers = if self.pseudo_header_order.len() > 1 {
            header::to_ordered(
                &sanitized,
                self.header_order.as_slice(),
                self.pseudo_header_order.as_slice(),
            )
        } else {
            header::to_ordered(
                &sanitized,
                self.header_order.as_slice(),
                &http2.pseudo_header_names()[..],
            )
        };

        log::debug!(
            "built fingerprint for {} ({} extensions, {} headers)",
            self.identity,
            tls.extensions().len(),
            headers.len()
        );

        Ok(Fingerprint {
            identity: self.identity,
            tls,
            http2,
            headers,
        })
    }
}
