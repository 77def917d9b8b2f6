use fingerprint_emulation::{
    header::{FlatHeaders, HEADER_ORDER_KEY, PSEUDO_HEADER_ORDER_KEY},
    http2::{Http2Overrides, PriorityOverride, SettingId},
    tls::{AlpnProtocol, ExtensionDescriptor},
    Emulation, Impersonate,
};

macro_rules! join {
    ($sep:expr, $first:expr $(, $rest:expr)*) => {
        concat!($first $(, $sep, $rest)*)
    };
}

const JA3: &str = join!(
    ",",
    "771",
    "4865-4866-4867-49195-49199-49196-49200-52393-52392-49171-49172-156-157-47-53",
    "0-23-65281-10-11-35-16-5-13-18-51-45-43-27-17513-21",
    "29-23-24",
    "0"
);

fn request_headers() -> FlatHeaders {
    [
        ("Host", "127.0.0.1:8080"),
        ("Accept", "text/html"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("X-KC-Client", "HelloIOS_16_0"),
        ("Content-Length", "0"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn test_emulation_ios() -> fingerprint_emulation::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let fingerprint = Emulation::builder()
        .ja3(JA3)
        .protocol("2")
        .identity("HelloIOS_16_0")
        .header_order(vec![
            "Host".to_owned(),
            "Accept".to_owned(),
            "Accept-Language".to_owned(),
        ])
        .target_url("https://m.example.com/home")
        .headers(request_headers())
        .build()
        .fingerprint()?;

    assert_eq!(fingerprint.identity, Impersonate::IOS16_0);
    assert_eq!(
        fingerprint.http2.setting(SettingId::InitialWindowSize),
        Some(2097152)
    );
    assert!(fingerprint
        .tls
        .extensions()
        .contains(&ExtensionDescriptor::Alpn(AlpnProtocol::Http2)));

    let headers = &fingerprint.headers;
    assert_eq!(headers.get("Host").unwrap(), &["m.example.com"]);
    assert!(headers.get("X-KC-Client").is_none());
    assert!(headers.get("Content-Length").is_none());
    assert_eq!(headers.get(HEADER_ORDER_KEY).unwrap().len(), 3);
    assert_eq!(
        headers.get(PSEUDO_HEADER_ORDER_KEY).unwrap(),
        &[":method", ":scheme", ":path", ":authority"]
    );
    Ok(())
}

#[test]
fn test_emulation_overrides() -> fingerprint_emulation::Result<()> {
    let overrides = Http2Overrides::builder()
        .settings(vec![(1, 65536), (2, 0), (4, 131072), (5, 16384), (99, 1)])
        .priorities(vec![
            PriorityOverride {
                stream_id: 3,
                dependency: 0,
                exclusive: false,
                weight: 201,
            },
            PriorityOverride {
                stream_id: 5,
                dependency: 0,
                exclusive: false,
                weight: 101,
            },
        ])
        .connection_flow(12517377)
        .build();

    let fingerprint = Emulation::builder()
        .ja3(JA3)
        .identity("Chrome_106")
        .http2_overrides(overrides)
        .target_url("https://example.com")
        .build()
        .fingerprint()?;

    let http2 = &fingerprint.http2;
    assert_eq!(http2.settings_order().len(), 4);
    assert_eq!(http2.setting(SettingId::EnablePush), Some(0));
    assert_eq!(http2.connection_flow(), 12517377);
    assert_eq!(
        http2.priorities().iter().map(|p| p.weight).collect::<Vec<_>>(),
        vec![200, 100]
    );
    Ok(())
}

#[test]
fn test_emulation_unknown_identity() -> fingerprint_emulation::Result<()> {
    let fingerprint = Emulation::builder()
        .ja3(JA3)
        .identity("HelloNetscape_4")
        .target_url("https://example.com")
        .build()
        .fingerprint()?;

    assert_eq!(fingerprint.identity, Impersonate::Chrome106);
    assert_eq!(fingerprint.http2.connection_flow(), 15663105);
    Ok(())
}

#[test]
fn test_emulation_invalid_ja3() {
    let err = Emulation::builder()
        .ja3("TLS12,4865,0,29,0")
        .target_url("https://example.com")
        .build()
        .fingerprint()
        .unwrap_err();

    assert!(err.is_invalid_version());
    assert_eq!(err.token(), "TLS12");
}
