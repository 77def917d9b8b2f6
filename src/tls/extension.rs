//! TLS extension descriptors and the JA3 extension-id table.
//!
//! Every extension token of a JA3 string is looked up in one static table keyed by its
//! decimal string. Entries either carry a fixed descriptor or say which piece of the
//! parsed ClientHello (curves, points, ALPN, max version) they embed.

use std::{borrow::Cow, collections::HashMap};

use bytes::Bytes;
use once_cell::sync::Lazy;

use super::types::{
    AlpnProtocol, CertificateCompressionAlgorithm, KeyShare, PaddingStyle, PskKeyExchangeMode,
    RenegotiationSupport, SignatureScheme, TlsVersion, GREASE_PLACEHOLDER,
};
use crate::error::{Error, Result};

/// A single ClientHello extension, as the TLS engine should emit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtensionDescriptor {
    /// A GREASE extension with a randomized reserved id.
    Grease,
    /// `server_name` (0). The TLS engine fills in the host name.
    ServerName,
    /// `status_request` (5), OCSP stapling.
    StatusRequest,
    /// `supported_groups` (10).
    SupportedCurves(Vec<u16>),
    /// `ec_point_formats` (11).
    SupportedPoints(Vec<u8>),
    /// `signature_algorithms` (13).
    SignatureAlgorithms(Cow<'static, [SignatureScheme]>),
    /// `application_layer_protocol_negotiation` (16).
    Alpn(AlpnProtocol),
    /// `signed_certificate_timestamp` (18).
    SignedCertificateTimestamp,
    /// `padding` (21).
    Padding(PaddingStyle),
    /// `extended_master_secret` (23).
    ExtendedMasterSecret,
    /// `compress_certificate` (27).
    CertificateCompression(Cow<'static, [CertificateCompressionAlgorithm]>),
    /// `record_size_limit` (28), announced without a limit value.
    RecordSizeLimit,
    /// `delegated_credentials` (34).
    DelegatedCredentials(Cow<'static, [SignatureScheme]>),
    /// `session_ticket` (35).
    SessionTicket,
    /// `pre_shared_key` (41).
    PreSharedKey,
    /// `early_data` (42).
    EarlyData,
    /// `supported_versions` (43).
    SupportedVersions(Vec<TlsVersion>),
    /// `cookie` (44).
    Cookie,
    /// `psk_key_exchange_modes` (45).
    PskKeyExchangeModes(Cow<'static, [PskKeyExchangeMode]>),
    /// `key_share` (51).
    KeyShare(Cow<'static, [KeyShare]>),
    /// `next_protocol_negotiation` (13172).
    NextProtocolNegotiation,
    /// `application_settings` (17513).
    ApplicationSettings(AlpnProtocol),
    /// `renegotiation_info` (65281).
    RenegotiationInfo(RenegotiationSupport),
    /// Any other extension, sent verbatim.
    Generic {
        /// Extension id.
        id: u16,
        /// Extension body.
        payload: Bytes,
    },
}

impl ExtensionDescriptor {
    /// The extension id as it appears on the wire.
    ///
    /// [`Grease`](ExtensionDescriptor::Grease) reports [`GREASE_PLACEHOLDER`]; the engine
    /// substitutes the actual reserved value.
    pub fn id(&self) -> u16 {
        match self {
            Self::Grease => GREASE_PLACEHOLDER,
            Self::ServerName => 0,
            Self::StatusRequest => 5,
            Self::SupportedCurves(_) => 10,
            Self::SupportedPoints(_) => 11,
            Self::SignatureAlgorithms(_) => 13,
            Self::Alpn(_) => 16,
            Self::SignedCertificateTimestamp => 18,
            Self::Padding(_) => 21,
            Self::ExtendedMasterSecret => 23,
            Self::CertificateCompression(_) => 27,
            Self::RecordSizeLimit => 28,
            Self::DelegatedCredentials(_) => 34,
            Self::SessionTicket => 35,
            Self::PreSharedKey => 41,
            Self::EarlyData => 42,
            Self::SupportedVersions(_) => 43,
            Self::Cookie => 44,
            Self::PskKeyExchangeModes(_) => 45,
            Self::KeyShare(_) => 51,
            Self::NextProtocolNegotiation => 13172,
            Self::ApplicationSettings(_) => 17513,
            Self::RenegotiationInfo(_) => 65281,
            Self::Generic { id, .. } => *id,
        }
    }

    /// Returns true for the GREASE placeholder extension.
    #[inline]
    pub fn is_grease(&self) -> bool {
        matches!(self, ExtensionDescriptor::Grease)
    }
}

/// The parts of an already parsed JA3 string that some extensions embed.
///
/// Curves and point formats must be parsed before any extension is built, so they are
/// handed in here rather than read back from the string.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    /// Protocol selected by the caller's hint, used by ALPN and ALPS.
    pub alpn: AlpnProtocol,
    /// GREASE-prefixed supported curves.
    pub curves: &'a [u16],
    /// Supported point formats.
    pub points: &'a [u8],
    /// Maximum TLS version from the JA3 version field.
    pub version_max: TlsVersion,
}

/// Fixed extension payloads of the emulated stack.
pub mod payload {
    use super::*;

    /// Signature schemes offered in `signature_algorithms`, in Chrome's order.
    pub const SIGNATURE_ALGORITHMS: &[SignatureScheme] = &[
        SignatureScheme::ECDSA_SECP256R1_SHA256,
        SignatureScheme::RSA_PSS_RSAE_SHA256,
        SignatureScheme::RSA_PKCS1_SHA256,
        SignatureScheme::ECDSA_SECP384R1_SHA384,
        SignatureScheme::RSA_PSS_RSAE_SHA384,
        SignatureScheme::RSA_PKCS1_SHA384,
        SignatureScheme::RSA_PSS_RSAE_SHA512,
        SignatureScheme::RSA_PKCS1_SHA512,
    ];

    /// Signature schemes offered for delegated credentials.
    pub const DELEGATED_CREDENTIALS: &[SignatureScheme] = SIGNATURE_ALGORITHMS;

    /// Certificate compression algorithms, Brotli first.
    pub const CERT_COMPRESSION_ALGORITHMS: &[CertificateCompressionAlgorithm] = &[
        CertificateCompressionAlgorithm::BROTLI,
        CertificateCompressionAlgorithm::ZLIB,
    ];

    /// PSK modes offered alongside a ticket.
    pub const PSK_KEY_EXCHANGE_MODES: &[PskKeyExchangeMode] = &[PskKeyExchangeMode::DheKe];

    /// Key shares for X25519 and P-256.
    pub const KEY_SHARES: &[KeyShare] = &[
        KeyShare {
            group: 29,
            data: &[32],
        },
        KeyShare {
            group: 23,
            data: &[65],
        },
    ];

    /// Renegotiation behaviour advertised in `renegotiation_info`.
    pub const RENEGOTIATION: RenegotiationSupport = RenegotiationSupport::OnceAsClient;

    /// Padding length rule.
    pub const PADDING_STYLE: PaddingStyle = PaddingStyle::Boring;

    /// Body of the `30032` (0x7550) extension.
    pub const CHANNEL_ID_PAYLOAD: &[u8] = &[0];
}

/// How a table entry turns into descriptors.
#[derive(Debug, Clone)]
enum Template {
    Fixed(ExtensionDescriptor),
    Curves,
    Points,
    Alpn,
    Alps,
    SupportedVersions,
    /// Emits a GREASE extension followed by padding.
    GreasedPadding,
}

impl Template {
    fn expand(&self, ctx: &ExtensionContext<'_>, out: &mut Vec<ExtensionDescriptor>) {
        let ext = match self {
            Template::Fixed(ext) => ext.clone(),
            Template::Curves => ExtensionDescriptor::SupportedCurves(ctx.curves.to_vec()),
            Template::Points => ExtensionDescriptor::SupportedPoints(ctx.points.to_vec()),
            Template::Alpn => ExtensionDescriptor::Alpn(ctx.alpn),
            Template::Alps => ExtensionDescriptor::ApplicationSettings(ctx.alpn),
            Template::SupportedVersions => {
                ExtensionDescriptor::SupportedVersions(vec![ctx.version_max])
            }
            Template::GreasedPadding => {
                out.push(ExtensionDescriptor::Grease);
                ExtensionDescriptor::Padding(payload::PADDING_STYLE)
            }
        };
        out.push(ext);
    }
}

fn generic(id: u16) -> Template {
    Template::Fixed(ExtensionDescriptor::Generic {
        id,
        payload: Bytes::new(),
    })
}

static EXTENSION_TABLE: Lazy<HashMap<&'static str, Template>> = Lazy::new(|| {
    use ExtensionDescriptor as E;

    HashMap::from([
        ("0", Template::Fixed(E::ServerName)),
        ("5", Template::Fixed(E::StatusRequest)),
        ("10", Template::Curves),
        ("11", Template::Points),
        (
            "13",
            Template::Fixed(E::SignatureAlgorithms(Cow::Borrowed(
                payload::SIGNATURE_ALGORITHMS,
            ))),
        ),
        ("16", Template::Alpn),
        ("18", Template::Fixed(E::SignedCertificateTimestamp)),
        ("21", Template::GreasedPadding),
        ("22", generic(22)),
        ("23", Template::Fixed(E::ExtendedMasterSecret)),
        (
            "27",
            Template::Fixed(E::CertificateCompression(Cow::Borrowed(
                payload::CERT_COMPRESSION_ALGORITHMS,
            ))),
        ),
        ("28", Template::Fixed(E::RecordSizeLimit)),
        (
            "34",
            Template::Fixed(E::DelegatedCredentials(Cow::Borrowed(
                payload::DELEGATED_CREDENTIALS,
            ))),
        ),
        ("35", Template::Fixed(E::SessionTicket)),
        ("41", Template::Fixed(E::PreSharedKey)),
        ("42", Template::Fixed(E::EarlyData)),
        ("43", Template::SupportedVersions),
        ("44", Template::Fixed(E::Cookie)),
        (
            "45",
            Template::Fixed(E::PskKeyExchangeModes(Cow::Borrowed(
                payload::PSK_KEY_EXCHANGE_MODES,
            ))),
        ),
        ("49", generic(49)),
        ("50", generic(50)),
        (
            "51",
            Template::Fixed(E::KeyShare(Cow::Borrowed(payload::KEY_SHARES))),
        ),
        ("13172", Template::Fixed(E::NextProtocolNegotiation)),
        ("17513", Template::Alps),
        (
            "30032",
            Template::Fixed(E::Generic {
                id: 0x7550,
                payload: Bytes::from_static(payload::CHANNEL_ID_PAYLOAD),
            }),
        ),
        ("65281", Template::Fixed(E::RenegotiationInfo(payload::RENEGOTIATION))),
    ])
});

/// Resolves one JA3 extension token and appends the resulting descriptors to `out`.
///
/// Most tokens produce one descriptor; `"21"` produces a GREASE extension followed by
/// padding. Tokens missing from the table but parsing as a `u16` become
/// [`ExtensionDescriptor::Generic`] with an empty payload.
pub(crate) fn push_extension(
    token: &str,
    ctx: &ExtensionContext<'_>,
    out: &mut Vec<ExtensionDescriptor>,
) -> Result<()> {
    match EXTENSION_TABLE.get(token) {
        Some(template) => {
            template.expand(ctx, out);
        }
        None => {
            let id = token
                .parse::<u16>()
                .map_err(|e| Error::extension_id(token, e))?;
            log::trace!("extension {} not in table, sending it as generic", id);
            out.push(ExtensionDescriptor::Generic {
                id,
                payload: Bytes::new(),
            });
        }
    }

    Ok(())
}

/// Maps a single JA3 extension token to the descriptors it produces.
///
/// # Errors
///
/// Returns an error for which [`Error::is_invalid_extension_id`] is true when the token is
/// neither in the table nor a decimal `u16`.
pub fn map_extension(token: &str, ctx: &ExtensionContext<'_>) -> Result<Vec<ExtensionDescriptor>> {
    let mut out = Vec::with_capacity(2);
    push_extension(token, ctx, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(alpn: AlpnProtocol) -> ExtensionContext<'static> {
        ExtensionContext {
            alpn,
            curves: &[GREASE_PLACEHOLDER, 29, 23, 24],
            points: &[0],
            version_max: TlsVersion::TLS_1_2,
        }
    }

    #[test]
    fn table_ids_match_descriptor_ids() {
        let ctx = ctx(AlpnProtocol::Http2);
        for (token, _) in EXTENSION_TABLE.iter() {
            let exts = map_extension(token, &ctx).unwrap();
            let last = exts.last().unwrap();
            assert_eq!(
                last.id().to_string(),
                *token,
                "descriptor for {} reports id {}",
                token,
                last.id()
            );
        }
    }

    #[test]
    fn padding_is_preceded_by_grease() {
        let exts = map_extension("21", &ctx(AlpnProtocol::Http2)).unwrap();
        assert_eq!(
            exts,
            vec![
                ExtensionDescriptor::Grease,
                ExtensionDescriptor::Padding(PaddingStyle::Boring)
            ]
        );
    }

    #[test]
    fn alpn_and_alps_follow_hint() {
        let h1 = ctx(AlpnProtocol::Http1);
        assert_eq!(
            map_extension("16", &h1).unwrap(),
            vec![ExtensionDescriptor::Alpn(AlpnProtocol::Http1)]
        );
        assert_eq!(
            map_extension("17513", &h1).unwrap(),
            vec![ExtensionDescriptor::ApplicationSettings(AlpnProtocol::Http1)]
        );

        let h2 = ctx(AlpnProtocol::Http2);
        assert_eq!(
            map_extension("16", &h2).unwrap(),
            vec![ExtensionDescriptor::Alpn(AlpnProtocol::Http2)]
        );
    }

    #[test]
    fn curves_points_and_versions_come_from_context() {
        let ctx = ctx(AlpnProtocol::Http2);
        assert_eq!(
            map_extension("10", &ctx).unwrap(),
            vec![ExtensionDescriptor::SupportedCurves(vec![
                GREASE_PLACEHOLDER,
                29,
                23,
                24
            ])]
        );
        assert_eq!(
            map_extension("11", &ctx).unwrap(),
            vec![ExtensionDescriptor::SupportedPoints(vec![0])]
        );
        assert_eq!(
            map_extension("43", &ctx).unwrap(),
            vec![ExtensionDescriptor::SupportedVersions(vec![TlsVersion::TLS_1_2])]
        );
    }

    #[test]
    fn unknown_numeric_is_generic() {
        let exts = map_extension("9999", &ctx(AlpnProtocol::Http2)).unwrap();
        assert_eq!(
            exts,
            vec![ExtensionDescriptor::Generic {
                id: 9999,
                payload: Bytes::new()
            }]
        );
    }

    #[test]
    fn unknown_non_numeric_is_error() {
        let err = map_extension("abc", &ctx(AlpnProtocol::Http2)).unwrap_err();
        assert!(err.is_invalid_extension_id());
        assert_eq!(err.token(), "abc");

        let err = map_extension("70000", &ctx(AlpnProtocol::Http2)).unwrap_err();
        assert!(err.is_invalid_extension_id());
    }

    #[test]
    fn channel_id_payload() {
        let exts = map_extension("30032", &ctx(AlpnProtocol::Http2)).unwrap();
        assert_eq!(
            exts,
            vec![ExtensionDescriptor::Generic {
                id: 0x7550,
                payload: Bytes::from_static(&[0])
            }]
        );
    }
}
