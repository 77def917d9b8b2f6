//! Native mobile apps.
//!
//! These clients use OkHttp on Android and NSURLSession on iOS, and advertise
//! `u32::MAX` for limits they do not enforce.

use crate::http2::{ClientProfile, ClientProfileBuilder, PseudoId::*, SettingId::*};

const CONNECTION_FLOW: u32 = 15663105;

#[inline]
fn builder(max_concurrent_streams: u32, initial_window_size: u32) -> ClientProfileBuilder {
    ClientProfile::builder()
        .setting(HeaderTableSize, 4096)
        .setting(MaxConcurrentStreams, max_concurrent_streams)
        .setting(InitialWindowSize, initial_window_size)
        .setting(MaxFrameSize, 16384)
        .setting(MaxHeaderListSize, u32::MAX)
        .pseudo_header_order([Method, Path, Authority, Scheme])
        .connection_flow(CONNECTION_FLOW)
}

pub(super) fn android() -> ClientProfile {
    builder(u32::MAX, 16777216).build()
}

pub(super) fn ios() -> ClientProfile {
    builder(100, 2097152).build()
}

pub(super) fn nike_ios() -> ClientProfile {
    builder(100, 2097152)
        .pseudo_header_order([Method, Scheme, Path, Authority])
        .build()
}

/// Only ever used over HTTP/1.1; the frames exist so the identity still has a profile.
pub(super) fn cloudflare() -> ClientProfile {
    android()
}
