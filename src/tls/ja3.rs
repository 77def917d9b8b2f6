use std::{num::ParseIntError, str::FromStr};

use super::{
    extension::{push_extension, ExtensionContext, ExtensionDescriptor},
    types::{AlpnProtocol, TlsVersion, GREASE_PLACEHOLDER},
    FingerprintSpec,
};
use crate::error::{Error, Result};

/// Number of comma separated fields in a JA3 string. Anything past the fifth is ignored.
const JA3_FIELDS: usize = 5;

/// Parses a JA3 string into a ClientHello template.
///
/// The fields are `version,ciphers,extensions,curves,point_formats`, each list
/// hyphen separated. Curves and point formats are parsed before the extension list
/// because extensions `10` and `11` embed them.
///
/// Missing or empty trailing fields yield empty lists; the cipher and curve lists still
/// start with the GREASE placeholder and the extension list with a GREASE extension.
pub fn parse(ja3: &str, alpn: AlpnProtocol) -> Result<FingerprintSpec> {
    let mut fields = ja3.split(',').take(JA3_FIELDS);

    let version_field = fields.next().unwrap_or_default().trim();
    let version_max = version_field
        .parse::<u16>()
        .map(TlsVersion::from_raw)
        .map_err(|e| Error::version(version_field, e))?;

    let cipher_suites = grease_prefixed(parse_list(fields.next(), Error::cipher)?);
    let extensions_field = fields.next();
    let supported_curves = grease_prefixed(parse_list(fields.next(), Error::curve)?);
    let supported_points: Vec<u8> = parse_list(fields.next(), Error::point_format)?;

    let ctx = ExtensionContext {
        alpn,
        curves: &supported_curves,
        points: &supported_points,
        version_max,
    };
    let extensions = build_extensions(extensions_field, &ctx)?;

    log::trace!(
        "parsed JA3: version {}, {} ciphers, {} extensions, {} curves",
        version_max.raw(),
        cipher_suites.len(),
        extensions.len(),
        supported_curves.len()
    );

    Ok(FingerprintSpec {
        tls_version_min: TlsVersion::TLS_1_0,
        tls_version_max: version_max,
        cipher_suites,
        extensions,
        supported_curves,
        supported_points,
    })
}

fn build_extensions(
    field: Option<&str>,
    ctx: &ExtensionContext<'_>,
) -> Result<Vec<ExtensionDescriptor>> {
    let mut extensions = vec![ExtensionDescriptor::Grease];

    for token in tokens(field) {
        push_extension(token, ctx, &mut extensions)?;
    }

    Ok(extensions)
}

fn parse_list<T>(field: Option<&str>, err: fn(&str, ParseIntError) -> Error) -> Result<Vec<T>>
where
    T: FromStr<Err = ParseIntError>,
{
    tokens(field)
        .map(|token| token.parse::<T>().map_err(|e| err(token, e)))
        .collect()
}

fn tokens(field: Option<&str>) -> impl Iterator<Item = &str> {
    field
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .into_iter()
        .flat_map(|field| field.split('-'))
        .map(str::trim)
}

#[inline]
fn grease_prefixed(list: Vec<u16>) -> Vec<u16> {
    let mut out = Vec::with_capacity(list.len() + 1);
    out.push(GREASE_PLACEHOLDER);
    out.extend(list);
    out
}
