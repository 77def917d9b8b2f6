/// Declares the `Impersonate` enum together with its canonical tokens and accepted names.
///
/// Each entry is `Variant => "token", "name"`. The token is the serde representation and
/// the registry key; the name is the spelling callers pass in (matched case-insensitively,
/// with or without a leading `Hello`).
macro_rules! define_identities {
    ($( $(#[$meta:meta])* $variant:ident => $token:literal, $name:literal; )+) => {
        /// A client identity whose fingerprint can be emulated.
        ///
        /// Serializes as its canonical token.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
        pub enum Impersonate {
            $(
                #[doc = concat!("`", $token, "`, requested as `", $name, "`.")]
                $(#[$meta])*
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl Impersonate {
            /// Every identity, in declaration order.
            pub const ALL: &'static [Impersonate] = &[$(Impersonate::$variant),+];

            /// The canonical token, e.g. `"Chrome-106"`.
            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Impersonate::$variant => $token,)+
                }
            }

            /// The caller-facing name, e.g. `"Chrome_106"`.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Impersonate::$variant => $name,)+
                }
            }
        }
    };
}

/// Implements the total string conversions for `Impersonate`.
macro_rules! impl_from_str {
    () => {
        impl From<&str> for Impersonate {
            #[inline]
            fn from(s: &str) -> Self {
                Impersonate::resolve(s)
            }
        }

        impl std::str::FromStr for Impersonate {
            type Err = std::convert::Infallible;

            #[inline]
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Impersonate::resolve(s))
            }
        }
    };
}
