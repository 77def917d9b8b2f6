use fingerprint_emulation::{
    http2::{ClientProfile, Http2Overrides, Priority, PriorityOverride, PseudoId, SettingId},
    profile_for, Impersonate, ProfileRegistry,
};

#[test]
fn identity_to_profile() {
    let chrome = Impersonate::resolve("HelloChrome_106").profile();
    assert_eq!(chrome.setting(SettingId::HeaderTableSize), Some(65536));
    assert_eq!(chrome.setting(SettingId::MaxHeaderListSize), Some(262144));
    assert_eq!(
        chrome.pseudo_header_names(),
        [":method", ":authority", ":scheme", ":path"]
    );

    let firefox = Impersonate::resolve("helloFIREFOX_102").profile();
    assert_eq!(firefox.priorities().len(), 6);
    assert_eq!(firefox.priorities()[5], Priority::new(13, 0, false, 240));
}

#[test]
fn identities_without_profile_use_default() {
    let default = ProfileRegistry::default_profile();
    for identity in [
        Impersonate::Chrome58,
        Impersonate::Chrome107,
        Impersonate::Golang,
        Impersonate::Randomized,
        Impersonate::Android11OkHttp,
    ] {
        assert_eq!(profile_for(identity), default, "{}", identity);
    }
    assert_eq!(profile_for(Impersonate::resolve("no such browser")), default);
}

#[test]
fn every_registered_token_is_an_identity() {
    for token in ProfileRegistry::tokens() {
        let identity = Impersonate::resolve(token);
        assert_eq!(identity.as_str(), token);
        assert!(ProfileRegistry::lookup(token).is_some());
    }
}

#[test]
fn profile_serializes() {
    let json = serde_json::to_value(profile_for(Impersonate::Safari16_0)).unwrap();
    assert_eq!(json["connection_flow"], 10485760);
    assert_eq!(json["pseudo_header_order"][3], ":authority");
    assert_eq!(json["settings"][0]["id"], "InitialWindowSize");

    let back: ClientProfile = serde_json::from_value(json).unwrap();
    assert_eq!(&back, profile_for(Impersonate::Safari16_0));
}

#[test]
fn custom_profile_from_frames() {
    let overrides = Http2Overrides::builder()
        .settings(vec![(3, 100), (4, 2097152), (7, 1), (3, 250)])
        .priorities(vec![PriorityOverride {
            stream_id: 3,
            dependency: 0,
            exclusive: false,
            weight: 42,
        }])
        .connection_flow(10485760)
        .pseudo_header_order([
            PseudoId::Method,
            PseudoId::Scheme,
            PseudoId::Path,
            PseudoId::Authority,
        ])
        .build();

    let profile = ClientProfile::from_overrides(&overrides);
    assert_eq!(
        profile.settings_order(),
        vec![SettingId::MaxConcurrentStreams, SettingId::InitialWindowSize]
    );
    assert_eq!(profile.setting(SettingId::MaxConcurrentStreams), Some(250));
    assert_eq!(profile.priorities(), &[Priority::new(3, 0, false, 41)]);
    assert_eq!(profile.connection_flow(), 10485760);
    assert_eq!(profile.pseudo_header_order()[3], PseudoId::Authority);
}
