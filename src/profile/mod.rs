//! The HTTP/2 profile registry.
//!
//! Profiles are keyed by the canonical identity token (see [`Impersonate::as_str`]).
//! Identities without an entry, and unknown tokens, get the Chrome 106 profile.

mod chrome;
mod firefox;
mod mobile;
mod safari;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{http2::ClientProfile, imp::Impersonate};

/// Identity whose profile is served on a miss.
pub const DEFAULT_IDENTITY: Impersonate = Impersonate::Chrome106;

static REGISTRY: Lazy<ProfileRegistry> = Lazy::new(ProfileRegistry::new);

/// An immutable token to profile table, built on first use.
#[derive(Debug)]
pub struct ProfileRegistry {
    entries: Vec<(&'static str, ClientProfile)>,
    index: HashMap<&'static str, usize>,
    default: usize,
}

impl ProfileRegistry {
    fn new() -> ProfileRegistry {
        use Impersonate::*;

        let entries: Vec<(&'static str, ClientProfile)> = [
            (Chrome103, chrome::v105()),
            (Chrome104, chrome::v105()),
            (Chrome105, chrome::v105()),
            (Chrome106, chrome::v106()),
            (Safari15_6_1, safari::desktop()),
            (Safari16_0, safari::desktop()),
            (IPad15_6, safari::mobile()),
            (IOS15_5, safari::mobile()),
            (IOS15_6, safari::mobile()),
            (IOS16_0, safari::mobile()),
            (Firefox102, firefox::v106()),
            (Firefox104, firefox::v106()),
            (Firefox105, firefox::v106()),
            (Firefox106, firefox::v106()),
            (Opera89, chrome::opera()),
            (Opera90, chrome::opera()),
            (Opera91, chrome::opera()),
            (ZalandoAndroidMobile, mobile::android()),
            (ZalandoIosMobile, mobile::ios()),
            (NikeIosMobile, mobile::nike_ios()),
            (NikeAndroidMobile, mobile::android()),
            (CloudflareCustom, mobile::cloudflare()),
        ]
        .into_iter()
        .map(|(identity, profile)| (identity.as_str(), profile))
        .collect();

        let index: HashMap<&'static str, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, (token, _))| (*token, i))
            .collect();

        // DEFAULT_IDENTITY is always one of the entries above.
        let default = index
            .get(DEFAULT_IDENTITY.as_str())
            .copied()
            .unwrap_or_default();

        ProfileRegistry {
            entries,
            index,
            default,
        }
    }

    /// Returns the profile for `token`, or the default profile when there is none.
    pub fn get(token: &str) -> &'static ClientProfile {
        match Self::lookup(token) {
            Some(profile) => profile,
            None => {
                log::debug!(
                    "no HTTP/2 profile for {:?}, using {}",
                    token,
                    DEFAULT_IDENTITY
                );
                Self::default_profile()
            }
        }
    }

    /// Returns the profile registered for exactly `token`.
    pub fn lookup(token: &str) -> Option<&'static ClientProfile> {
        let registry = &*REGISTRY;
        registry
            .index
            .get(token)
            .map(|&i| &registry.entries[i].1)
    }

    /// Every registered token, in registration order.
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        REGISTRY.entries.iter().map(|(token, _)| *token)
    }

    /// The Chrome 106 profile.
    pub fn default_profile() -> &'static ClientProfile {
        let registry = &*REGISTRY;
        &registry.entries[registry.default].1
    }
}

/// The HTTP/2 profile sent by `identity`.
#[inline]
pub fn profile_for(identity: Impersonate) -> &'static ClientProfile {
    ProfileRegistry::get(identity.as_str())
}

/// The SETTINGS baseline used when overrides carry none.
#[inline]
pub(crate) fn baseline() -> &'static ClientProfile {
    ProfileRegistry::default_profile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http2::{PseudoId, SettingId::*};

    #[test]
    fn chrome_106() {
        let profile = profile_for(Impersonate::Chrome106);
        assert_eq!(
            profile.settings_order(),
            vec![
                HeaderTableSize,
                EnablePush,
                MaxConcurrentStreams,
                InitialWindowSize,
                MaxHeaderListSize
            ]
        );
        assert_eq!(profile.setting(EnablePush), Some(0));
        assert_eq!(profile.setting(InitialWindowSize), Some(6291456));
        assert_eq!(profile.connection_flow(), 15663105);
        assert!(profile.priorities().is_empty());
    }

    #[test]
    fn older_chrome_omits_enable_push() {
        for identity in [Impersonate::Chrome103, Impersonate::Chrome105, Impersonate::Opera91] {
            let profile = profile_for(identity);
            assert_eq!(profile.setting(EnablePush), None);
            assert_eq!(profile.setting(MaxConcurrentStreams), Some(1000));
        }
    }

    #[test]
    fn firefox_priorities() {
        let profile = profile_for(Impersonate::Firefox104);
        let tree: Vec<_> = profile
            .priorities()
            .iter()
            .map(|p| (p.stream_id, p.dependency, p.weight))
            .collect();
        assert_eq!(
            tree,
            vec![
                (3, 0, 200),
                (5, 0, 100),
                (7, 0, 0),
                (9, 7, 0),
                (11, 3, 0),
                (13, 0, 240)
            ]
        );
        assert!(profile.priorities().iter().all(|p| !p.exclusive));
        assert_eq!(profile.connection_flow(), 12517377);
        assert_eq!(
            profile.pseudo_header_order(),
            &[
                PseudoId::Method,
                PseudoId::Path,
                PseudoId::Authority,
                PseudoId::Scheme
            ]
        );
    }

    #[test]
    fn safari_windows() {
        assert_eq!(
            profile_for(Impersonate::Safari16_0).setting(InitialWindowSize),
            Some(4194304)
        );
        assert_eq!(
            profile_for(Impersonate::IPad15_6).setting(InitialWindowSize),
            Some(2097152)
        );
        assert_eq!(profile_for(Impersonate::IOS16_0).connection_flow(), 10485760);
    }

    #[test]
    fn mobile_sentinels() {
        let profile = profile_for(Impersonate::ZalandoAndroidMobile);
        assert_eq!(profile.setting(MaxConcurrentStreams), Some(u32::MAX));
        assert_eq!(profile.setting(MaxHeaderListSize), Some(u32::MAX));

        let nike = profile_for(Impersonate::NikeIosMobile);
        assert_eq!(nike.setting(MaxConcurrentStreams), Some(100));
        assert_eq!(nike.pseudo_header_names(), [":method", ":scheme", ":path", ":authority"]);
    }

    #[test]
    fn unknown_token_is_default() {
        assert_eq!(ProfileRegistry::get("Netscape-4"), profile_for(Impersonate::Chrome106));
        assert!(ProfileRegistry::lookup("Netscape-4").is_none());
        assert_eq!(profile_for(Impersonate::Golang), ProfileRegistry::default_profile());
    }

    #[test]
    fn settings_order_is_permutation_of_settings() {
        for token in ProfileRegistry::tokens() {
            let profile = ProfileRegistry::get(token);
            let mut order = profile.settings_order();
            let keys: Vec<_> = profile.settings().into_keys().collect();
            assert_eq!(order.len(), keys.len(), "{}", token);
            order.sort();
            assert_eq!(order, keys, "{}", token);
        }
    }

    #[test]
    fn pseudo_order_is_permutation() {
        for token in ProfileRegistry::tokens() {
            let mut names = ProfileRegistry::get(token).pseudo_header_names();
            names.sort_unstable();
            assert_eq!(names, [":authority", ":method", ":path", ":scheme"], "{}", token);
        }
    }

    #[test]
    fn registry_tokens() {
        assert_eq!(ProfileRegistry::tokens().count(), 22);
        assert!(ProfileRegistry::tokens().any(|t| t == "cloudflare_custom"));
        assert!(ProfileRegistry::tokens().any(|t| t == "iPad-15.6"));
    }
}
