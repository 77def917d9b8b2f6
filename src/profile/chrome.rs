//! Chromium based browsers.

use crate::http2::{ClientProfile, ClientProfileBuilder, PseudoId::*, SettingId::*};

const CONNECTION_FLOW: u32 = 15663105;

#[inline]
fn builder() -> ClientProfileBuilder {
    ClientProfile::builder()
        .pseudo_header_order([Method, Authority, Scheme, Path])
        .connection_flow(CONNECTION_FLOW)
}

/// Chrome 106 announces `ENABLE_PUSH = 0`; earlier releases leave it out.
pub(super) fn v106() -> ClientProfile {
    builder()
        .setting(HeaderTableSize, 65536)
        .setting(EnablePush, 0)
        .setting(MaxConcurrentStreams, 1000)
        .setting(InitialWindowSize, 6291456)
        .setting(MaxHeaderListSize, 262144)
        .build()
}

/// Chrome 103 through 105.
pub(super) fn v105() -> ClientProfile {
    builder()
        .setting(HeaderTableSize, 65536)
        .setting(MaxConcurrentStreams, 1000)
        .setting(InitialWindowSize, 6291456)
        .setting(MaxHeaderListSize, 262144)
        .build()
}

/// Opera 89 through 91 send the same frames as Chrome 105.
#[inline]
pub(super) fn opera() -> ClientProfile {
    v105()
}
