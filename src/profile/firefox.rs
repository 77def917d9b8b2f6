//! Firefox.

use crate::http2::{ClientProfile, Priority, PseudoId::*, SettingId::*};

/// The idle stream tree Firefox opens right after the connection preface.
const PRIORITIES: [Priority; 6] = [
    Priority::new(3, 0, false, 200),
    Priority::new(5, 0, false, 100),
    Priority::new(7, 0, false, 0),
    Priority::new(9, 7, false, 0),
    Priority::new(11, 3, false, 0),
    Priority::new(13, 0, false, 240),
];

/// Firefox 102 through 106.
pub(super) fn v106() -> ClientProfile {
    ClientProfile::builder()
        .setting(HeaderTableSize, 65536)
        .setting(InitialWindowSize, 131072)
        .setting(MaxFrameSize, 16384)
        .pseudo_header_order([Method, Path, Authority, Scheme])
        .connection_flow(12517377)
        .priorities(PRIORITIES)
        .build()
}
