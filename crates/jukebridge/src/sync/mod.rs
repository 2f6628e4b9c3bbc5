//! The syncer core: per-session state store plus delta computation.
//!
//! The browser-side listener posts a complete snapshot of "what should be
//! playing" on every change. [`JukeboxSyncer`] remembers the last accepted
//! snapshot per session, asks the delta engine for the minimal set of events
//! explaining the transition, and forwards those events to the mixer sink -
//! whole snapshots never travel downstream.
//!
//! Concurrency model: per-session state lives in a [`DashMap`] keyed by
//! session id, so unrelated sessions proceed fully in parallel. Event
//! computation happens synchronously inside short map-entry critical
//! sections; no map reference is held across a sink await. At most one
//! in-flight operation per session id is assumed - the transport layer is
//! responsible for not racing snapshots for the same session.

mod delta;
mod error;
mod units;

pub use error::SyncError;
pub use units::{parse_duration, volume_delta_db, DurationParseError};

use dashmap::DashMap;
use jukeproto::{EventSink, Snapshot};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct Session {
    started: bool,
    last: Option<Snapshot>,
}

/// Session state store and event forwarder.
pub struct JukeboxSyncer<S> {
    sink: S,
    sessions: DashMap<String, Session>,
}

impl<S: EventSink> JukeboxSyncer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            sessions: DashMap::new(),
        }
    }

    /// Idempotently mark a session started.
    ///
    /// The mixer is notified first; a sink failure propagates verbatim and
    /// leaves the session unmarked, so the caller can retry.
    #[instrument(skip(self))]
    pub async fn start(&self, id: &str) -> Result<(), SyncError> {
        self.sink.start(id).await?;
        self.sessions.entry(id.to_string()).or_default().started = true;
        info!("session started");
        Ok(())
    }

    /// Idempotently stop a session, discarding its remembered snapshot.
    ///
    /// A stopped session has no meaningful last-known state to diff a future
    /// snapshot against, so the whole entry is dropped - a restarted session
    /// begins from a clean slate (and a different user may then own it). As
    /// with `start`, a sink failure propagates and leaves state untouched.
    #[instrument(skip(self))]
    pub async fn stop(&self, id: &str) -> Result<(), SyncError> {
        self.sink.stop(id).await?;
        self.sessions.remove(id);
        info!("session stopped");
        Ok(())
    }

    /// Accept a snapshot, forward the resulting events, commit the snapshot.
    ///
    /// Validation failures abort with nothing mutated and nothing sent.
    /// Individual send failures are logged and skipped - they never abort
    /// sibling events, and the snapshot still replaces the last-known state
    /// afterwards. Forgetting a delivered-but-unsent transition would only
    /// make the detector re-emit duplicates later.
    #[instrument(skip_all, fields(session_id = %snapshot.session_id))]
    pub async fn handle(&self, snapshot: Snapshot) -> Result<(), SyncError> {
        if snapshot.session_id.is_empty() {
            return Err(SyncError::InvalidInput("empty session id"));
        }

        let events = {
            let entry = self.sessions.get(&snapshot.session_id);
            let Some(session) = entry.as_deref().filter(|s| s.started) else {
                return Err(SyncError::NotStarted(snapshot.session_id.clone()));
            };
            match &session.last {
                None => delta::scan_for_playing(&snapshot),
                Some(last) => delta::snapshot_delta(last, &snapshot)?,
            }
        };
        debug!(events = events.len(), "computed snapshot delta");

        for event in &events {
            if let Err(err) = self.sink.send(event).await {
                warn!(url = %event.asset_url, %err, "failed to forward event to mixer");
            }
        }

        if let Some(mut session) = self.sessions.get_mut(&snapshot.session_id) {
            session.last = Some(snapshot);
        }
        Ok(())
    }
}
