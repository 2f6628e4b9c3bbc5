//! Delta computation: turn two snapshots (or a first-ever snapshot) into the
//! minimal ordered list of mixer events explaining the transition.

use jukeproto::{EventKind, MixerEvent, Snapshot, Track};
use tracing::warn;

use super::error::SyncError;
use super::units::{parse_duration, volume_delta_db};

/// Initial event set for a session's first-ever snapshot: one PLAY per track
/// currently playing, nothing for the rest.
pub(crate) fn scan_for_playing(snapshot: &Snapshot) -> Vec<MixerEvent> {
    snapshot
        .tracks
        .iter()
        .filter(|track| track.playing)
        .map(|track| make_event(track, EventKind::Play, &snapshot.session_id))
        .collect()
}

/// Events describing the transition from `old` to `new`.
///
/// Validates in order: session id match, timestamp not strictly older (equal
/// timestamps pass - with enough bad luck snapshots arrive out of order, and
/// skipping one is harmless since the next diff covers the gap), then user id
/// match (single-writer simplification; deduping concurrent editors is a
/// non-goal). Tracks are iterated in `new`'s order, which fixes event order.
pub(crate) fn snapshot_delta(
    old: &Snapshot,
    new: &Snapshot,
) -> Result<Vec<MixerEvent>, SyncError> {
    if new.session_id != old.session_id {
        return Err(SyncError::SessionMismatch {
            old: old.session_id.clone(),
            new: new.session_id.clone(),
        });
    }

    if new.timestamp < old.timestamp {
        return Err(SyncError::StaleSnapshot {
            old: old.timestamp,
            new: new.timestamp,
        });
    }

    if new.user_id != old.user_id {
        return Err(SyncError::UserMismatch {
            old: old.user_id.clone(),
            new: new.user_id.clone(),
        });
    }

    let mut events = Vec::new();
    for track in &new.tracks {
        events.extend(track_delta(
            old.find_track(&track.url),
            track,
            &new.session_id,
        ));
    }
    Ok(events)
}

/// Per-track rules. Each rule contributes 0 or 1 event, so one track can
/// contribute several events in a single call.
pub(crate) fn track_delta(
    old: Option<&Track>,
    new: &Track,
    session_id: &str,
) -> Vec<MixerEvent> {
    let mut events = Vec::new();

    // Brand-new correlation: only a currently-playing track produces anything.
    // Without a prior value no other comparison is meaningful.
    let Some(old) = old else {
        if new.playing {
            events.push(make_event(new, EventKind::Play, session_id));
        }
        return events;
    };

    if new.playing != old.playing {
        let kind = if new.playing {
            EventKind::Play
        } else {
            EventKind::Stop
        };
        events.push(make_event(new, kind, session_id));
    }

    if new.looping != old.looping {
        events.push(make_event(new, EventKind::Other, session_id));
    }

    if new.volume != old.volume {
        let mut event = make_event(new, EventKind::Volume, session_id);
        event.volume_delta_db = volume_delta_db(old.volume / 100.0, new.volume / 100.0);
        events.push(event);
    }

    // The tabletop reports seeking in a roundabout way: the progress fraction
    // moves immediately while the actual position updates later, so the new
    // position must be recovered as duration * progress.
    if new.playing && old.playing && new.progress != old.progress {
        match parse_duration(&new.duration) {
            Ok(duration) => {
                let mut event = make_event(new, EventKind::Seek, session_id);
                event.seek_position_sec =
                    (duration.as_secs_f64() * new.progress.min(1.0)) as i64;
                events.push(event);
            }
            Err(err) => {
                // Non-fatal: the seek is dropped, everything else stands.
                warn!(duration = %new.duration, %err, "ignoring seek, unparseable duration");
            }
        }
    }

    events
}

fn make_event(track: &Track, kind: EventKind, session_id: &str) -> MixerEvent {
    MixerEvent {
        record_id: session_id.to_string(),
        evt_id: track.url.clone(),
        kind,
        asset_url: track.url.clone(),
        looping: track.looping,
        // The tabletop never plays tracks at full scale, so every event
        // carries the track's absolute attenuation versus full volume as a
        // gain reference. VOLUME events overwrite this with the old-to-new
        // delta; the two meanings must not be conflated.
        volume_delta_db: volume_delta_db(1.0, track.volume / 100.0),
        seek_position_sec: 0,
    }
}
