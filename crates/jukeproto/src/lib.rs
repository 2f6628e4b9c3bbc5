//! jukeproto - Wire and domain types for the jukebridge snapshot relay
//!
//! This crate defines the two data shapes that cross process boundaries:
//!
//! - **Inbound**: a [`Snapshot`] is the complete reported state of one
//!   jukebox session, posted by the browser-side listener on every change.
//!   Snapshots are immutable once received; the relay never forwards them
//!   downstream.
//! - **Outbound**: a [`MixerEvent`] is one semantic command (play, stop,
//!   seek, volume, other) for the remote live mixer. The delta engine in the
//!   `jukebridge` crate turns snapshot transitions into ordered event lists.
//!
//! The [`EventSink`] trait is the capability boundary between the core and
//! whatever transport delivers events to the mixer. Production uses an HTTP
//! client; tests use recording doubles.

mod event;
mod sink;
mod snapshot;

pub use event::{EventKind, MixerEvent};
pub use sink::{EventSink, SinkError};
pub use snapshot::{SessionRequest, Snapshot, Track};
