use std::{error::Error as StdError, fmt, num::ParseIntError};

/// A `Result` alias where the `Err` case is `fingerprint_emulation::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// A boxed error type that can be used for dynamic error handling.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// The Errors that may occur when parsing a JA3 fingerprint.
///
/// Every error names the JA3 field that failed and carries the offending token.
/// Identity resolution, profile lookup and header transforms never fail, so this
/// type only ever comes out of [`parse_ja3`](crate::parse_ja3) and
/// [`map_extension`](crate::tls::map_extension).
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    token: String,
    source: Option<BoxError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    InvalidVersion,
    InvalidCipher,
    InvalidCurve,
    InvalidPointFormat,
    InvalidExtensionId,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, token: &str, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                token: token.to_owned(),
                source: source.map(Into::into),
            }),
        }
    }

    pub(crate) fn version(token: &str, e: ParseIntError) -> Error {
        Error::new(Kind::InvalidVersion, token, Some(e))
    }

    pub(crate) fn cipher(token: &str, e: ParseIntError) -> Error {
        Error::new(Kind::InvalidCipher, token, Some(e))
    }

    pub(crate) fn curve(token: &str, e: ParseIntError) -> Error {
        Error::new(Kind::InvalidCurve, token, Some(e))
    }

    pub(crate) fn point_format(token: &str, e: ParseIntError) -> Error {
        Error::new(Kind::InvalidPointFormat, token, Some(e))
    }

    pub(crate) fn extension_id(token: &str, e: ParseIntError) -> Error {
        Error::new(Kind::InvalidExtensionId, token, Some(e))
    }
}

impl Error {
    /// Returns the token that could not be parsed.
    pub fn token(&self) -> &str {
        &self.inner.token
    }

    /// Returns true if the TLS version field was not a number.
    pub fn is_invalid_version(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidVersion)
    }

    /// Returns true if a cipher suite token was not a number.
    pub fn is_invalid_cipher(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidCipher)
    }

    /// Returns true if a supported curve token was not a number.
    pub fn is_invalid_curve(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidCurve)
    }

    /// Returns true if a point format token was not a number.
    pub fn is_invalid_point_format(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidPointFormat)
    }

    /// Returns true if an extension token was neither known nor a number.
    pub fn is_invalid_extension_id(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidExtensionId)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut builder = f.debug_struct("fingerprint_emulation::Error");

        builder.field("kind", &self.inner.kind);
        builder.field("token", &self.inner.token);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let field = match self.inner.kind {
            Kind::InvalidVersion => "TLS version",
            Kind::InvalidCipher => "cipher suite",
            Kind::InvalidCurve => "supported curve",
            Kind::InvalidPointFormat => "point format",
            Kind::InvalidExtensionId => "extension id",
        };

        write!(f, "invalid {} in JA3 string: {:?}", field, self.inner.token)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}
