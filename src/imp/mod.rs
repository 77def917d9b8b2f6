//! Client identities.
//!
//! An [`Impersonate`] names one real client: a browser release, a mobile app, or one of the
//! generic TLS stacks. Resolution from a caller supplied name never fails; names that match
//! nothing fall back to [`Impersonate::default`].

#[macro_use]
mod macros;

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::http2::ClientProfile;

define_identities! {
    Custom => "Custom-0", "Custom";

    Chrome58 => "Chrome-58", "Chrome_58";
    Chrome62 => "Chrome-62", "Chrome_62";
    Chrome70 => "Chrome-70", "Chrome_70";
    Chrome72 => "Chrome-72", "Chrome_72";
    Chrome83 => "Chrome-83", "Chrome_83";
    Chrome87 => "Chrome-87", "Chrome_87";
    Chrome96 => "Chrome-96", "Chrome_96";
    Chrome100 => "Chrome-100", "Chrome_100";
    Chrome103 => "Chrome-103", "Chrome_103";
    Chrome104 => "Chrome-104", "Chrome_104";
    Chrome105 => "Chrome-105", "Chrome_105";
    #[default]
    Chrome106 => "Chrome-106", "Chrome_106";
    Chrome107 => "Chrome-107", "Chrome_107";

    Firefox55 => "Firefox-55", "Firefox_55";
    Firefox56 => "Firefox-56", "Firefox_56";
    Firefox63 => "Firefox-63", "Firefox_63";
    Firefox65 => "Firefox-65", "Firefox_65";
    Firefox102 => "Firefox-102", "Firefox_102";
    Firefox104 => "Firefox-104", "Firefox_104";
    Firefox105 => "Firefox-105", "Firefox_105";
    Firefox106 => "Firefox-106", "Firefox_106";

    Android11OkHttp => "Android-11", "Android_11_OkHttp";

    IOS11_1 => "iOS-11.1", "IOS_11_1";
    IOS12_1 => "iOS-12.1", "IOS_12_1";
    IOS13 => "iOS-13", "IOS_13";
    IOS14 => "iOS-14", "IOS_14";
    IOS15_5 => "iOS-15.5", "IOS_15_5";
    IOS15_6 => "iOS-15.6", "IOS_15_6";
    IOS16_0 => "iOS-16.0", "IOS_16_0";

    Safari15_6_1 => "Safari-15.6.1", "Safari_15_6_1";
    Safari16_0 => "Safari-16.0", "Safari_16_0";

    IPad15_6 => "iPad-15.6", "IPad_15_6";

    Golang => "Golang-0", "Golang";

    Opera89 => "Opera-89", "Opera_89";
    Opera90 => "Opera-90", "Opera_90";
    Opera91 => "Opera-91", "Opera_91";

    Randomized => "Randomized-0", "Randomized";
    RandomizedAlpn => "Randomized-ALPN-0", "RandomizedALPN";
    RandomizedNoAlpn => "Randomized-NoALPN-0", "RandomizedNoALPN";

    ZalandoAndroidMobile => "zalando_android_mobile", "zalando_android_mobile";
    ZalandoIosMobile => "zalando_ios_mobile", "zalando_ios_mobile";
    NikeIosMobile => "nike_ios_mobile", "nike_ios_mobile";
    NikeAndroidMobile => "nike_android_mobile", "nike_android_mobile";
    CloudflareCustom => "cloudflare_custom", "cloudflare_custom";
}

impl_from_str!();

/// `*_Auto` names, each pinned to the newest release of its family that has a full profile.
const AUTO_ALIASES: &[(&str, Impersonate)] = &[
    ("chrome_auto", Impersonate::Chrome106),
    ("firefox_auto", Impersonate::Firefox106),
    ("ios_auto", Impersonate::IOS16_0),
    ("safari_auto", Impersonate::Safari16_0),
    ("ipad_auto", Impersonate::IPad15_6),
    ("opera_auto", Impersonate::Opera91),
];

/// Lowercased token, name and alias → identity.
static LOOKUP: Lazy<HashMap<String, Impersonate>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(Impersonate::ALL.len() * 2 + AUTO_ALIASES.len());

    for &identity in Impersonate::ALL {
        map.insert(identity.as_str().to_ascii_lowercase(), identity);
        map.insert(identity.name().to_ascii_lowercase(), identity);
    }

    for &(alias, identity) in AUTO_ALIASES {
        map.insert(alias.to_owned(), identity);
    }

    map
});

impl Impersonate {
    /// Resolves a caller supplied name to an identity.
    ///
    /// Matching is case-insensitive and accepts the canonical token (`Chrome-106`), the
    /// name (`Chrome_106`) and the same name with a `Hello` prefix (`HelloChrome_106`).
    /// Anything else resolves to the default identity.
    pub fn resolve(name: &str) -> Impersonate {
        let lowered = name.trim().to_ascii_lowercase();

        let found = LOOKUP.get(lowered.as_str()).or_else(|| {
            lowered
                .strip_prefix("hello")
                .and_then(|rest| LOOKUP.get(rest))
        });

        match found {
            Some(identity) => *identity,
            None => {
                log::debug!(
                    "unknown client identity {:?}, using {}",
                    name,
                    Impersonate::default()
                );
                Impersonate::default()
            }
        }
    }

    /// The HTTP/2 profile this identity sends.
    #[inline]
    pub fn profile(self) -> &'static ClientProfile {
        crate::profile::profile_for(self)
    }
}

impl fmt::Display for Impersonate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
