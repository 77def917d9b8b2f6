//! Safari on macOS, iPhone and iPad.

use crate::http2::{ClientProfile, ClientProfileBuilder, PseudoId::*, SettingId::*};

const CONNECTION_FLOW: u32 = 10485760;

#[inline]
fn builder(initial_window_size: u32) -> ClientProfileBuilder {
    ClientProfile::builder()
        .setting(InitialWindowSize, initial_window_size)
        .setting(MaxConcurrentStreams, 100)
        .pseudo_header_order([Method, Scheme, Path, Authority])
        .connection_flow(CONNECTION_FLOW)
}

pub(super) fn desktop() -> ClientProfile {
    builder(4194304).build()
}

/// iOS and iPadOS use a smaller stream window than desktop Safari.
pub(super) fn mobile() -> ClientProfile {
    builder(2097152).build()
}
