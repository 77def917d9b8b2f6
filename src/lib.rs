#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(test, deny(warnings))]

//! # fingerprint-emulation
//!
//! Builds the network fingerprint of a real browser or mobile app for one outbound request.
//!
//! Three artifacts are produced, and none of them touch the network:
//!
//! - a TLS ClientHello template parsed from a JA3 string ([`parse_ja3`])
//! - an HTTP/2 session profile for a client identity ([`Impersonate`], [`ProfileRegistry`])
//! - the request headers, sanitized and reshaped for the wire ([`header`])
//!
//! [`Emulation`] ties the three together. Executing the handshake and sending frames is
//! the transport's job.
//!
//! ## Building a fingerprint
//!
//! ```rust
//! use fingerprint_emulation::{Emulation, Impersonate};
//!
//! let fingerprint = Emulation::builder()
//!     .ja3("771,4865-4866-4867,0-23-65281-10-11-35-16-5-13-18-51-45-43-21,29-23-24,0")
//!     .identity("HelloChrome_106")
//!     .target_url("https://example.com/")
//!     .build()
//!     .fingerprint()?;
//!
//! assert_eq!(fingerprint.identity, Impersonate::Chrome106);
//! assert_eq!(fingerprint.http2.connection_flow(), 15663105);
//! # Ok::<(), fingerprint_emulation::Error>(())
//! ```
//!
//! ## Parsing JA3 alone
//!
//! ```rust
//! let spec = fingerprint_emulation::parse_ja3("771,4865-4866,0-16,29,0", "2")?;
//! assert_eq!(spec.cipher_suites().len(), 3);
//! # Ok::<(), fingerprint_emulation::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! - **cookies** *(enabled by default)*: Re-issuing upstream cookies with [`ResponseReplay`].

#[cfg(feature = "cookies")]
pub mod cookie;
mod emulation;
mod error;
pub mod header;
pub mod http2;
mod imp;
mod jitter;
pub mod profile;
#[cfg(feature = "cookies")]
mod replay;
pub mod tls;

pub use http::StatusCode;

pub use self::{
    emulation::{Emulation, Fingerprint},
    error::{BoxError, Error, Result},
    http2::{ClientProfile, Http2Overrides},
    imp::Impersonate,
    jitter::Jitter,
    profile::{profile_for, ProfileRegistry},
    tls::{AlpnProtocol, FingerprintSpec},
};

#[cfg(feature = "cookies")]
pub use self::replay::{ResponseReplay, REPLAY_COOKIE_LIFETIME};

/// Parses a JA3 string into a ClientHello template.
///
/// `protocol_hint` selects the ALPN protocol: `"1"` offers `http/1.1`, anything else `h2`.
/// See [`tls::parse`] for the field rules.
#[inline]
pub fn parse_ja3(ja3: &str, protocol_hint: &str) -> Result<FingerprintSpec> {
    tls::parse(ja3, AlpnProtocol::from_hint(protocol_hint))
}

/// Resolves a client identity name. Never fails; unknown names give Chrome 106.
#[inline]
pub fn resolve_identity(name: &str) -> Impersonate {
    Impersonate::resolve(name)
}
