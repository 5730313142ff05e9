//! The merge rule.

use crate::model::{LocalPlaylist, PlaylistSyncResult, RemotePlaylist, TrackId};
use std::collections::HashSet;
use tracing::debug;

/// Merge a remote track list with the pre-existing local one.
///
/// The result is the remote tracks in remote order, followed by every local
/// track whose id does not appear remotely, in its original relative order.
/// Stable, no re-sorting, no partial records: where an id exists on both
/// sides, the remote record wins wholesale.
///
/// Title and thumbnail are taken from remote when non-blank, else retained
/// from the local record.
///
/// Merging twice with an unchanged remote produces an identical result, so
/// re-sync is idempotent.
pub fn merge(remote: &RemotePlaylist, local: &LocalPlaylist) -> PlaylistSyncResult {
    let remote_ids: HashSet<&TrackId> = remote.tracks.iter().map(|t| &t.id).collect();

    let mut tracks = remote.tracks.clone();
    tracks.extend(
        local
            .tracks
            .iter()
            .filter(|t| !remote_ids.contains(&t.id))
            .cloned(),
    );

    let title = if remote.title.trim().is_empty() {
        local.name.clone()
    } else {
        remote.title.clone()
    };

    let thumbnail_url = remote
        .thumbnail_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
        .or_else(|| local.thumbnail_url.clone());

    debug!(
        remote_tracks = remote.tracks.len(),
        local_only = tracks.len() - remote.tracks.len(),
        "Merged playlist"
    );

    PlaylistSyncResult {
        title,
        thumbnail_url,
        tracks,
    }
}
