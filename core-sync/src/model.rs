//! Playlist and track models for reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque upstream track identifier.
///
/// Reconciliation equality is by id only; two records with the same id are
/// the same track regardless of metadata differences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One track as seen by either provenance (locally persisted or remotely
/// fetched). Read-only from this crate's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Remote playlist page as fetched from the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlaylist {
    pub title: String,
    pub thumbnail_url: Option<String>,
    /// Tracks in remote order.
    pub tracks: Vec<Track>,
}

/// Locally persisted playlist, read through the storage collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlaylist {
    pub name: String,
    pub thumbnail_url: Option<String>,
    /// Tracks in stored order.
    pub tracks: Vec<Track>,
}

/// Result of one merge, handed to the storage collaborator for a
/// transactional write. Not persisted by this crate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSyncResult {
    /// Final playlist title.
    pub title: String,
    /// Final thumbnail, when either side has one.
    pub thumbnail_url: Option<String>,
    /// Final ordered track list.
    pub tracks: Vec<Track>,
}

impl PlaylistSyncResult {
    /// Final ordering as ids.
    pub fn track_ids(&self) -> Vec<&TrackId> {
        self.tracks.iter().map(|t| &t.id).collect()
    }

    /// View this result as the local playlist a subsequent sync would read
    /// back. Merging the same remote against it must be a no-op.
    pub fn as_local(&self) -> LocalPlaylist {
        LocalPlaylist {
            name: self.title.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
            tracks: self.tracks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_equality_is_full_but_id_is_the_key() {
        let a = Track::new("id1", "Title", "Artist");
        let b = Track::new("id1", "Other Title", "Artist");
        assert_ne!(a, b);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn track_builder() {
        let track = Track::new("id1", "Title", "Artist").with_duration(Duration::from_secs(245));
        assert_eq!(track.id.as_str(), "id1");
        assert_eq!(track.duration, Some(Duration::from_secs(245)));
    }

    #[test]
    fn sync_result_round_trips_to_local() {
        let result = PlaylistSyncResult {
            title: "Mix".into(),
            thumbnail_url: Some("https://img.example/t.jpg".into()),
            tracks: vec![Track::new("a", "A", "x")],
        };
        let local = result.as_local();
        assert_eq!(local.name, "Mix");
        assert_eq!(local.tracks, result.tracks);
    }
}
