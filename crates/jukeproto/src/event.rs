//! Outbound mixer event types.
//!
//! One `MixerEvent` describes a single semantic change the mixer must apply.
//! Whole snapshots are never forwarded downstream; the delta engine emits the
//! minimal ordered list of these instead.

use serde::{Deserialize, Serialize};

/// The kind of change an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Play,
    Stop,
    Seek,
    Volume,
    /// Generic "something else changed" signal. Currently used for loop-state
    /// changes; the consumer reads the event's `loop` field to act on it.
    Other,
}

/// One command event for the remote mixer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixerEvent {
    /// Session the event belongs to.
    pub record_id: String,
    /// External event identity: the track url.
    pub evt_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub asset_url: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// For `Volume` events, the old-to-new gain delta in decibels. For every
    /// other kind this carries the track's absolute attenuation versus full
    /// scale instead - consumers must not conflate the two meanings.
    pub volume_delta_db: f64,
    /// Target position in whole seconds. Only meaningful for `Seek`.
    pub seek_position_sec: i64,
}
