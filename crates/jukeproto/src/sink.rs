//! The capability boundary between the core and the mixer transport.

use async_trait::async_trait;
use thiserror::Error;

use crate::MixerEvent;

/// Errors surfaced by an [`EventSink`] implementation.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The transport could not complete the call at all.
    #[error("mixer transport error: {0}")]
    Transport(String),

    /// The mixer answered with a non-success status.
    #[error("mixer returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

/// Downstream consumer of mixer events.
///
/// `start`/`stop` bracket a session on the mixer side; `send` delivers one
/// event at most once, with no acknowledgement semantics assumed by the
/// caller. Timeouts and retries are the implementation's business - the core
/// treats every call as an opaque awaitable.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn start(&self, id: &str) -> Result<(), SinkError>;

    async fn stop(&self, id: &str) -> Result<(), SinkError>;

    async fn send(&self, event: &MixerEvent) -> Result<(), SinkError>;
}

#[async_trait]
impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    async fn start(&self, id: &str) -> Result<(), SinkError> {
        (**self).start(id).await
    }

    async fn stop(&self, id: &str) -> Result<(), SinkError> {
        (**self).stop(id).await
    }

    async fn send(&self, event: &MixerEvent) -> Result<(), SinkError> {
        (**self).send(event).await
    }
}
