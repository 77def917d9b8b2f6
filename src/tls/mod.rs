//! TLS ClientHello templates
//!
//! A [`FingerprintSpec`] is built from a JA3 string with [`parse_ja3`](crate::parse_ja3)
//! and handed to the TLS engine, which performs the actual handshake.

mod extension;
mod ja3;
mod types;

pub use self::{
    extension::{map_extension, payload, ExtensionContext, ExtensionDescriptor},
    ja3::parse,
    types::{
        is_grease, AlpnProtocol, CertificateCompressionAlgorithm, KeyShare, PaddingStyle,
        PskKeyExchangeMode, RenegotiationSupport, SignatureScheme, TlsVersion,
        GREASE_PLACEHOLDER,
    },
};

/// A ClientHello template parsed from a JA3 string.
///
/// The cipher and curve lists always begin with [`GREASE_PLACEHOLDER`], and the extension
/// list always begins with [`ExtensionDescriptor::Grease`]. When a padding extension is
/// present, a second GREASE extension sits immediately before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FingerprintSpec {
    pub(crate) tls_version_min: TlsVersion,
    pub(crate) tls_version_max: TlsVersion,
    pub(crate) cipher_suites: Vec<u16>,
    pub(crate) extensions: Vec<ExtensionDescriptor>,
    pub(crate) supported_curves: Vec<u16>,
    pub(crate) supported_points: Vec<u8>,
}

impl FingerprintSpec {
    /// The lowest TLS version offered. Always TLS 1.0.
    #[inline]
    pub fn tls_version_min(&self) -> TlsVersion {
        self.tls_version_min
    }

    /// The highest TLS version offered, taken from the JA3 version field.
    #[inline]
    pub fn tls_version_max(&self) -> TlsVersion {
        self.tls_version_max
    }

    /// Cipher suites in ClientHello order, GREASE first.
    #[inline]
    pub fn cipher_suites(&self) -> &[u16] {
        &self.cipher_suites
    }

    /// Extensions in ClientHello order.
    #[inline]
    pub fn extensions(&self) -> &[ExtensionDescriptor] {
        &self.extensions
    }

    /// Supported groups, GREASE first.
    #[inline]
    pub fn supported_curves(&self) -> &[u16] {
        &self.supported_curves
    }

    /// EC point formats.
    #[inline]
    pub fn supported_points(&self) -> &[u8] {
        &self.supported_points
    }

    /// Renders the template back into JA3 text, with GREASE values left out.
    pub fn ja3_string(&self) -> String {
        fn join<T: ToString>(iter: impl Iterator<Item = T>) -> String {
            iter.map(|v| v.to_string()).collect::<Vec<_>>().join("-")
        }

        format!(
            "{},{},{},{},{}",
            self.tls_version_max.raw(),
            join(self.cipher_suites.iter().filter(|c| !is_grease(**c))),
            join(
                self.extensions
                    .iter()
                    .filter(|e| !e.is_grease())
                    .map(ExtensionDescriptor::id)
            ),
            join(self.supported_curves.iter().filter(|c| !is_grease(**c))),
            join(self.supported_points.iter()),
        )
    }
}
