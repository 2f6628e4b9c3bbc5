//! jukebridge - relays tabletop jukebox snapshots into live mixer events
//!
//! A browser-side listener posts the complete state of a game session's audio
//! jukebox on every change. This service remembers the last snapshot per
//! session, computes the minimal set of semantic events (play/stop/seek/
//! volume/other) explaining the transition, and forwards those events to a
//! remote live audio mixer over HTTP.
//!
//! Layout:
//! - [`sync`] - the core: session store, delta engine, gain/duration math
//! - [`web`] - axum endpoints the listener posts to
//! - [`mixer`] - reqwest client implementing the mixer sink
//! - [`config`] / [`telemetry`] - service plumbing

pub mod config;
pub mod mixer;
pub mod sync;
pub mod telemetry;
pub mod web;
