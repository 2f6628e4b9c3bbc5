//! Inbound snapshot types, as posted by the browser-side jukebox listener.
//!
//! Field names mirror the listener's JSON payload (`rId`, `uId`, `date`),
//! which in turn mirrors what the tabletop exposes. `loop` is a Rust keyword,
//! so the struct field is `looping` with a serde rename.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One audio cue within a session snapshot.
///
/// The `url` doubles as the track's identity: tracks are correlated across
/// snapshots by url, and it is what the mixer ultimately fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Display title. The listener omits it for untitled cues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub playing: bool,
    /// Linear volume percentage, 0-100.
    pub volume: f64,
    /// Fraction of the track elapsed, 0-1. Only meaningful while playing.
    #[serde(default)]
    pub progress: f64,
    /// Human-formatted duration ("83", "1:23", "1:23:45"). Parsed lazily,
    /// only when needed for seek math.
    #[serde(default)]
    pub duration: String,
}

/// Complete reported state of one jukebox session at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session (campaign/record) id.
    #[serde(rename = "rId")]
    pub session_id: String,
    /// Id of the player whose browser posted the snapshot.
    #[serde(rename = "uId")]
    pub user_id: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Track order is irrelevant for correlation but fixes the order in
    /// which events are emitted.
    pub tracks: Vec<Track>,
}

impl Snapshot {
    /// Find the first track with the given url, if any.
    ///
    /// When multiple tracks share a url within one snapshot only the first
    /// match is considered; later duplicates are never correlated.
    pub fn find_track(&self, url: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.url == url)
    }
}

/// Payload for the start/stop session endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_deserializes_listener_payload() {
        let json = r#"{
            "rId": "campaign-42",
            "uId": "player-7",
            "date": "2024-03-01T18:30:00Z",
            "tracks": [
                {
                    "title": "Tavern Ambience",
                    "url": "https://cdn.example/ttaudio/123",
                    "loop": true,
                    "playing": true,
                    "volume": 75.0,
                    "progress": 0.25,
                    "duration": "3:45"
                }
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.session_id, "campaign-42");
        assert_eq!(snapshot.user_id, "player-7");
        assert_eq!(snapshot.tracks.len(), 1);

        let track = &snapshot.tracks[0];
        assert_eq!(track.title.as_deref(), Some("Tavern Ambience"));
        assert!(track.looping);
        assert!(track.playing);
        assert_eq!(track.volume, 75.0);
        assert_eq!(track.duration, "3:45");
    }

    #[test]
    fn optional_track_fields_default() {
        let json = r#"{
            "url": "https://cdn.example/a",
            "loop": false,
            "playing": false,
            "volume": 100.0
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.title, None);
        assert_eq!(track.progress, 0.0);
        assert_eq!(track.duration, "");
    }

    #[test]
    fn find_track_uses_first_duplicate() {
        let json = r#"{
            "rId": "1", "uId": "2", "date": "2024-03-01T18:30:00Z",
            "tracks": [
                {"url": "a", "loop": false, "playing": true, "volume": 50.0},
                {"url": "a", "loop": true, "playing": false, "volume": 10.0}
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let found = snapshot.find_track("a").unwrap();
        assert!(found.playing);
        assert_eq!(found.volume, 50.0);
        assert!(snapshot.find_track("b").is_none());
    }
}
