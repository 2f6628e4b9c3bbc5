//! Error taxonomy for the syncer core.

use chrono::{DateTime, Utc};
use jukeproto::SinkError;
use thiserror::Error;

/// Errors surfaced by [`JukeboxSyncer`](super::JukeboxSyncer) operations.
///
/// Validation failures (`SessionMismatch`, `StaleSnapshot`, `UserMismatch`)
/// abort the whole `handle` call with no state mutated - they usually mean a
/// duplicate or out-of-order delivery, and dropping the snapshot is safe
/// because the next full snapshot carries all the information again.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid snapshot: {0}")]
    InvalidInput(&'static str),

    #[error("session '{0}' has not been started")]
    NotStarted(String),

    #[error("mismatching session id (old '{old}', new '{new}')")]
    SessionMismatch { old: String, new: String },

    #[error("stale snapshot: new '{new}' is older than last-known '{old}'")]
    StaleSnapshot {
        old: DateTime<Utc>,
        new: DateTime<Utc>,
    },

    #[error("user id mismatch, multiple users are updating the same session (old '{old}', new '{new}')")]
    UserMismatch { old: String, new: String },

    /// The mixer failed a start or stop call. Propagated verbatim so the
    /// caller can retry; per-event send failures never take this path.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
