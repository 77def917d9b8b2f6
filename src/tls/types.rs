use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// The reserved GREASE value placed at the head of the cipher and curve lists.
///
/// See <https://www.rfc-editor.org/rfc/rfc8701.html>
pub const GREASE_PLACEHOLDER: u16 = 0x0a0a;

/// Returns true if `value` is one of the sixteen reserved GREASE values (`0x?a?a`).
#[inline]
pub const fn is_grease(value: u16) -> bool {
    let hi = (value >> 8) as u8;
    let lo = value as u8;
    hi == lo && (hi & 0x0f) == 0x0a
}

/// A TLS protocol version, as the raw wire value.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TlsVersion(pub(crate) u16);

impl TlsVersion {
    /// Version 1.0 of the TLS protocol.
    pub const TLS_1_0: TlsVersion = TlsVersion(0x0301);

    /// Version 1.1 of the TLS protocol.
    pub const TLS_1_1: TlsVersion = TlsVersion(0x0302);

    /// Version 1.2 of the TLS protocol.
    pub const TLS_1_2: TlsVersion = TlsVersion(0x0303);

    /// Version 1.3 of the TLS protocol.
    pub const TLS_1_3: TlsVersion = TlsVersion(0x0304);

    /// Wraps a raw wire version. Unknown values are kept as-is.
    #[inline]
    pub const fn from_raw(raw: u16) -> TlsVersion {
        TlsVersion(raw)
    }

    /// The raw wire value, e.g. `771` for TLS 1.2.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// A TLS ALPN protocol.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlpnProtocol {
    /// Prefer HTTP/1.1
    #[serde(rename = "http/1.1")]
    Http1,
    /// Prefer HTTP/2
    #[serde(rename = "h2")]
    Http2,
}

impl AlpnProtocol {
    /// Maps a caller protocol hint to an ALPN protocol.
    ///
    /// `"1"` selects `http/1.1`; every other hint selects `h2`.
    #[inline]
    pub fn from_hint(hint: &str) -> AlpnProtocol {
        if hint == "1" {
            AlpnProtocol::Http1
        } else {
            AlpnProtocol::Http2
        }
    }

    /// The protocol identifier as sent on the wire.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            AlpnProtocol::Http1 => "http/1.1",
            AlpnProtocol::Http2 => "h2",
        }
    }

    /// Encodes the protocol as a length-prefixed ALPN entry.
    #[inline]
    pub fn encode(self) -> Bytes {
        Self::encode_sequence(std::iter::once(&self))
    }

    /// Encodes a list of protocols as length-prefixed ALPN entries.
    pub fn encode_sequence<'a, I>(items: I) -> Bytes
    where
        I: IntoIterator<Item = &'a AlpnProtocol>,
    {
        let mut buf = BytesMut::new();
        for item in items {
            let proto = item.as_str().as_bytes();
            buf.put_u8(proto.len() as u8);
            buf.extend_from_slice(proto);
        }
        buf.freeze()
    }
}

impl Default for AlpnProtocol {
    fn default() -> Self {
        AlpnProtocol::Http2
    }
}

impl From<&str> for AlpnProtocol {
    fn from(hint: &str) -> Self {
        AlpnProtocol::from_hint(hint)
    }
}

/// A TLS signature scheme code point.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureScheme(pub u16);

impl SignatureScheme {
    /// `rsa_pkcs1_sha256`
    pub const RSA_PKCS1_SHA256: SignatureScheme = SignatureScheme(0x0401);
    /// `rsa_pkcs1_sha384`
    pub const RSA_PKCS1_SHA384: SignatureScheme = SignatureScheme(0x0501);
    /// `rsa_pkcs1_sha512`
    pub const RSA_PKCS1_SHA512: SignatureScheme = SignatureScheme(0x0601);
    /// `ecdsa_secp256r1_sha256`
    pub const ECDSA_SECP256R1_SHA256: SignatureScheme = SignatureScheme(0x0403);
    /// `ecdsa_secp384r1_sha384`
    pub const ECDSA_SECP384R1_SHA384: SignatureScheme = SignatureScheme(0x0503);
    /// `rsa_pss_rsae_sha256`
    pub const RSA_PSS_RSAE_SHA256: SignatureScheme = SignatureScheme(0x0804);
    /// `rsa_pss_rsae_sha384`
    pub const RSA_PSS_RSAE_SHA384: SignatureScheme = SignatureScheme(0x0805);
    /// `rsa_pss_rsae_sha512`
    pub const RSA_PSS_RSAE_SHA512: SignatureScheme = SignatureScheme(0x0806);
}

/// IANA assigned identifier of compression algorithm.
/// See <https://www.rfc-editor.org/rfc/rfc8879.html#name-compression-algorithms>
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateCompressionAlgorithm(pub u16);

impl CertificateCompressionAlgorithm {
    /// Zlib compression algorithm.
    pub const ZLIB: CertificateCompressionAlgorithm = CertificateCompressionAlgorithm(1);

    /// Brotli compression algorithm.
    pub const BROTLI: CertificateCompressionAlgorithm = CertificateCompressionAlgorithm(2);

    /// Zstd compression algorithm.
    pub const ZSTD: CertificateCompressionAlgorithm = CertificateCompressionAlgorithm(3);
}

/// A PSK key exchange mode.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PskKeyExchangeMode {
    /// PSK-only key establishment.
    Ke = 0,
    /// PSK with (EC)DHE key establishment.
    DheKe = 1,
}

/// A key-share entry announced in the ClientHello.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize)]
pub struct KeyShare {
    /// Named group.
    pub group: u16,
    /// Placeholder key material; the TLS engine generates the real share.
    pub data: &'static [u8],
}

/// How the client answers renegotiation requests.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenegotiationSupport {
    /// Never renegotiate.
    Never,
    /// Allow one renegotiation per connection.
    OnceAsClient,
    /// Allow any number of renegotiations.
    FreelyAsClient,
}

/// How the padding extension computes its length.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddingStyle {
    /// Pad ClientHellos between 256 and 511 bytes up to 512, as BoringSSL does.
    Boring,
}

impl PaddingStyle {
    /// Returns the padding payload length for an unpadded ClientHello of `hello_len` bytes,
    /// or `None` when no padding is sent.
    pub fn padding_len(self, hello_len: usize) -> Option<usize> {
        match self {
            PaddingStyle::Boring => {
                if hello_len > 0xff && hello_len < 0x200 {
                    // four bytes of extension header
                    let padding = 0x200 - hello_len;
                    Some(padding.saturating_sub(4).max(1))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpn_protocol_encode() {
        let alpn = AlpnProtocol::encode_sequence(&[AlpnProtocol::Http1, AlpnProtocol::Http2]);
        assert_eq!(alpn, Bytes::from_static(b"\x08http/1.1\x02h2"));

        let alpn = AlpnProtocol::encode_sequence(&[AlpnProtocol::Http2, AlpnProtocol::Http1]);
        assert_eq!(alpn, Bytes::from_static(b"\x02h2\x08http/1.1"));
    }

    #[test]
    fn alpn_protocol_encode_single() {
        let alpn = AlpnProtocol::Http1.encode();
        assert_eq!(alpn, b"\x08http/1.1".as_ref());

        let alpn = AlpnProtocol::Http2.encode();
        assert_eq!(alpn, b"\x02h2".as_ref());
    }

    #[test]
    fn alpn_from_hint() {
        assert_eq!(AlpnProtocol::from_hint("1"), AlpnProtocol::Http1);
        assert_eq!(AlpnProtocol::from_hint("2"), AlpnProtocol::Http2);
        assert_eq!(AlpnProtocol::from_hint(""), AlpnProtocol::Http2);
        assert_eq!(AlpnProtocol::from_hint("http/1.1"), AlpnProtocol::Http2);
    }

    #[test]
    fn grease_values() {
        for hi in 0..16u16 {
            let value = (hi << 12) | 0x0a00 | (hi << 4) | 0x0a;
            assert!(is_grease(value), "0x{:04x} should be GREASE", value);
        }
        assert!(is_grease(GREASE_PLACEHOLDER));
        assert!(!is_grease(0x0303));
        assert!(!is_grease(0x1301));
        assert!(!is_grease(0x00ff));
    }

    #[test]
    fn boring_padding() {
        assert_eq!(PaddingStyle::Boring.padding_len(200), None);
        assert_eq!(PaddingStyle::Boring.padding_len(300), Some(208));
        assert_eq!(PaddingStyle::Boring.padding_len(510), Some(1));
        assert_eq!(PaddingStyle::Boring.padding_len(512), None);
    }
}
