//! HTTP/2 session profiles.
//!
//! A [`ClientProfile`] describes everything a real client reveals while opening an
//! HTTP/2 connection: the SETTINGS values and the order they are sent in, the
//! pseudo-header order of HEADERS frames, the first connection-level WINDOW_UPDATE, and
//! the PRIORITY frames some clients send right after the preface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Connection window sent when an override carries no usable value.
pub const DEFAULT_CONNECTION_FLOW: u32 = 15663105;

/// A SETTINGS frame parameter identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum SettingId {
    /// `SETTINGS_HEADER_TABLE_SIZE`
    HeaderTableSize = 0x1,
    /// `SETTINGS_ENABLE_PUSH`
    EnablePush = 0x2,
    /// `SETTINGS_MAX_CONCURRENT_STREAMS`
    MaxConcurrentStreams = 0x3,
    /// `SETTINGS_INITIAL_WINDOW_SIZE`
    InitialWindowSize = 0x4,
    /// `SETTINGS_MAX_FRAME_SIZE`
    MaxFrameSize = 0x5,
    /// `SETTINGS_MAX_HEADER_LIST_SIZE`
    MaxHeaderListSize = 0x6,
}

impl SettingId {
    /// Maps a wire identifier to a known setting. Only identifiers 1 through 6 are known.
    pub const fn from_u16(id: u16) -> Option<SettingId> {
        match id {
            0x1 => Some(SettingId::HeaderTableSize),
            0x2 => Some(SettingId::EnablePush),
            0x3 => Some(SettingId::MaxConcurrentStreams),
            0x4 => Some(SettingId::InitialWindowSize),
            0x5 => Some(SettingId::MaxFrameSize),
            0x6 => Some(SettingId::MaxHeaderListSize),
            _ => None,
        }
    }

    /// The wire identifier.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// A pseudo-header field of an HTTP/2 request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PseudoId {
    /// `:method`
    #[serde(rename = ":method")]
    Method,
    /// `:authority`
    #[serde(rename = ":authority")]
    Authority,
    /// `:scheme`
    #[serde(rename = ":scheme")]
    Scheme,
    /// `:path`
    #[serde(rename = ":path")]
    Path,
}

impl PseudoId {
    /// The pseudo-header name, including the leading colon.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            PseudoId::Method => ":method",
            PseudoId::Authority => ":authority",
            PseudoId::Scheme => ":scheme",
            PseudoId::Path => ":path",
        }
    }
}

/// The pseudo-header order Chrome sends, also used when nothing else is known.
pub const DEFAULT_PSEUDO_ORDER: [PseudoId; 4] = [
    PseudoId::Method,
    PseudoId::Authority,
    PseudoId::Scheme,
    PseudoId::Path,
];

/// A single SETTINGS parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setting {
    /// Parameter identifier.
    pub id: SettingId,
    /// Parameter value.
    pub value: u32,
}

/// A PRIORITY frame sent after connection setup.
///
/// `weight` is the value carried on the wire, i.e. the effective weight minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Priority {
    /// Stream the frame is sent on.
    pub stream_id: u32,
    /// Stream this one depends on; 0 is the root.
    pub dependency: u32,
    /// Exclusive dependency flag.
    pub exclusive: bool,
    /// Wire weight, 0 through 255.
    pub weight: u8,
}

impl Priority {
    /// Creates a priority frame from a wire weight.
    #[inline]
    pub const fn new(stream_id: u32, dependency: u32, exclusive: bool, weight: u8) -> Priority {
        Priority {
            stream_id,
            dependency,
            exclusive,
            weight,
        }
    }
}

/// An HTTP/2 session profile.
///
/// SETTINGS are stored as one ordered list, so [`settings_order`](Self::settings_order)
/// is always a permutation of the keys of [`settings`](Self::settings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    settings: Vec<Setting>,
    pseudo_header_order: [PseudoId; 4],
    connection_flow: u32,
    priorities: Vec<Priority>,
}

impl ClientProfile {
    /// Starts building a profile.
    #[inline]
    pub fn builder() -> ClientProfileBuilder {
        ClientProfileBuilder::default()
    }

    /// SETTINGS values keyed by identifier.
    pub fn settings(&self) -> BTreeMap<SettingId, u32> {
        self.settings.iter().map(|s| (s.id, s.value)).collect()
    }

    /// SETTINGS identifiers in the order they are sent.
    pub fn settings_order(&self) -> Vec<SettingId> {
        self.settings.iter().map(|s| s.id).collect()
    }

    /// SETTINGS parameters in the order they are sent.
    #[inline]
    pub fn settings_frame(&self) -> &[Setting] {
        &self.settings
    }

    /// The value of a single setting, if the profile sends it.
    pub fn setting(&self, id: SettingId) -> Option<u32> {
        self.settings.iter().find(|s| s.id == id).map(|s| s.value)
    }

    /// Pseudo-header order of HEADERS frames.
    #[inline]
    pub fn pseudo_header_order(&self) -> &[PseudoId; 4] {
        &self.pseudo_header_order
    }

    /// Pseudo-header names in order, e.g. `[":method", ":authority", ":scheme", ":path"]`.
    pub fn pseudo_header_names(&self) -> [&'static str; 4] {
        self.pseudo_header_order.map(PseudoId::as_str)
    }

    /// Increment of the first connection-level WINDOW_UPDATE.
    #[inline]
    pub fn connection_flow(&self) -> u32 {
        self.connection_flow
    }

    /// PRIORITY frames sent after the preface, in order.
    #[inline]
    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    /// Builds a profile from caller supplied frame data.
    ///
    /// Only SETTINGS identifiers 1 through 6 are honoured; anything else is skipped.
    /// When no SETTINGS survive, the Chrome baseline SETTINGS are used. Priority weights
    /// arrive one greater than the wire value and are corrected here. A connection window
    /// of 0 or 1 falls back to [`DEFAULT_CONNECTION_FLOW`].
    pub fn from_overrides(overrides: &Http2Overrides) -> ClientProfile {
        let mut builder = ClientProfile::builder();

        for &(id, value) in &overrides.settings {
            match SettingId::from_u16(id) {
                Some(id) => builder = builder.setting(id, value),
                None => log::debug!("ignoring unknown HTTP/2 setting id {}", id),
            }
        }

        if builder.settings.is_empty() {
            log::debug!("no HTTP/2 settings override, using baseline settings");
            builder = builder.settings(crate::profile::baseline().settings_frame());
        }

        let connection_flow = if overrides.connection_flow <= 1 {
            DEFAULT_CONNECTION_FLOW
        } else {
            overrides.connection_flow
        };

        builder
            .pseudo_header_order(overrides.pseudo_header_order.unwrap_or(DEFAULT_PSEUDO_ORDER))
            .connection_flow(connection_flow)
            .priorities(
                overrides
                    .priorities
                    .iter()
                    .copied()
                    .map(PriorityOverride::to_priority),
            )
            .build()
    }
}

/// Builder for [`ClientProfile`].
#[derive(Debug, Clone)]
pub struct ClientProfileBuilder {
    settings: Vec<Setting>,
    pseudo_header_order: [PseudoId; 4],
    connection_flow: u32,
    priorities: Vec<Priority>,
}

impl Default for ClientProfileBuilder {
    fn default() -> Self {
        ClientProfileBuilder {
            settings: Vec::new(),
            pseudo_header_order: DEFAULT_PSEUDO_ORDER,
            connection_flow: DEFAULT_CONNECTION_FLOW,
            priorities: Vec::new(),
        }
    }
}

impl ClientProfileBuilder {
    /// Appends a setting. Setting an identifier twice keeps its first position and
    /// replaces its value.
    pub fn setting(mut self, id: SettingId, value: u32) -> Self {
        match self.settings.iter_mut().find(|s| s.id == id) {
            Some(existing) => existing.value = value,
            None => self.settings.push(Setting { id, value }),
        }
        self
    }

    /// Appends several settings in order.
    pub fn settings<'a, I>(self, settings: I) -> Self
    where
        I: IntoIterator<Item = &'a Setting>,
    {
        settings
            .into_iter()
            .fold(self, |builder, s| builder.setting(s.id, s.value))
    }

    /// Sets the pseudo-header order.
    #[inline]
    pub fn pseudo_header_order(mut self, order: [PseudoId; 4]) -> Self {
        self.pseudo_header_order = order;
        self
    }

    /// Sets the connection window increment.
    #[inline]
    pub fn connection_flow(mut self, connection_flow: u32) -> Self {
        self.connection_flow = connection_flow;
        self
    }

    /// Appends a PRIORITY frame.
    #[inline]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priorities.push(priority);
        self
    }

    /// Appends several PRIORITY frames in order.
    pub fn priorities<I>(mut self, priorities: I) -> Self
    where
        I: IntoIterator<Item = Priority>,
    {
        self.priorities.extend(priorities);
        self
    }

    /// Finishes the profile.
    pub fn build(self) -> ClientProfile {
        ClientProfile {
            settings: self.settings,
            pseudo_header_order: self.pseudo_header_order,
            connection_flow: self.connection_flow,
            priorities: self.priorities,
        }
    }
}

/// A PRIORITY frame as received from a caller, with `weight` one greater than on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOverride {
    /// Stream the frame is sent on.
    pub stream_id: u32,
    /// Stream this one depends on.
    pub dependency: u32,
    /// Exclusive dependency flag.
    pub exclusive: bool,
    /// Effective weight, 1 through 256.
    pub weight: u16,
}

impl PriorityOverride {
    /// Converts to a wire frame. Out of range weights saturate.
    pub fn to_priority(self) -> Priority {
        let weight = self.weight.saturating_sub(1).min(u8::MAX as u16) as u8;
        Priority::new(self.stream_id, self.dependency, self.exclusive, weight)
    }
}

/// Explicit HTTP/2 frame data that replaces a registry profile.
#[derive(TypedBuilder, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Http2Overrides {
    /// `(id, value)` SETTINGS entries in send order.
    #[builder(default, setter(into))]
    pub settings: Vec<(u16, u32)>,

    /// PRIORITY frames, weights off by one.
    #[builder(default, setter(into))]
    pub priorities: Vec<PriorityOverride>,

    /// Connection window increment; 0 or 1 means "use the default".
    #[builder(default)]
    pub connection_flow: u32,

    /// Pseudo-header order; the Chrome order when absent.
    #[builder(default, setter(strip_option))]
    pub pseudo_header_order: Option<[PseudoId; 4]>,
}
