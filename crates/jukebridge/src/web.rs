//! HTTP endpoints for the browser-side listener.
//!
//! Thin shell around the syncer: decode, delegate, map to a status code.
//! The snapshot endpoint always answers 202 once the body decodes - the
//! poster is a fire-and-forget browser script that cannot act on rejections,
//! so those are logged server-side instead.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use jukeproto::{EventSink, SessionRequest, Snapshot};
use tracing::{debug, error, info};

use crate::sync::JukeboxSyncer;

/// Shared state for the HTTP handlers.
pub struct AppState<S> {
    pub syncer: JukeboxSyncer<S>,
    pub start_time: Instant,
}

impl<S> AppState<S> {
    pub fn new(syncer: JukeboxSyncer<S>) -> Self {
        Self {
            syncer,
            start_time: Instant::now(),
        }
    }
}

pub fn router<S: EventSink + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/v1/record/start", post(start_record::<S>))
        .route("/api/v1/record/stop", post(stop_record::<S>))
        .route("/api/v1/record/event", post(handle_snapshot::<S>))
        .route("/health", get(handle_health::<S>))
        .with_state(state)
}

async fn start_record<S: EventSink>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SessionRequest>,
) -> impl IntoResponse {
    match state.syncer.start(&req.id).await {
        Ok(()) => {
            info!(id = %req.id, "starting a new record");
            StatusCode::ACCEPTED.into_response()
        }
        Err(err) => {
            error!(id = %req.id, %err, "failed to start record");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

async fn stop_record<S: EventSink>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SessionRequest>,
) -> impl IntoResponse {
    match state.syncer.stop(&req.id).await {
        Ok(()) => {
            info!(id = %req.id, "stopping record");
            StatusCode::ACCEPTED.into_response()
        }
        Err(err) => {
            error!(id = %req.id, %err, "failed to stop record");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

async fn handle_snapshot<S: EventSink>(
    State(state): State<Arc<AppState<S>>>,
    Json(snapshot): Json<Snapshot>,
) -> impl IntoResponse {
    debug!(
        session_id = %snapshot.session_id,
        tracks = snapshot.tracks.len(),
        "processing snapshot"
    );
    if let Err(err) = state.syncer.handle(snapshot).await {
        error!(%err, "failed to process snapshot");
    }
    StatusCode::ACCEPTED
}

async fn handle_health<S: EventSink>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
