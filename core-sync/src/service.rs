//! Sync orchestration: fetch, merge, transactional write.

use crate::error::{Result, SyncError};
use crate::model::{LocalPlaylist, PlaylistSyncResult, RemotePlaylist};
use crate::reconciler::merge;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Fetches a remote playlist page from the upstream.
#[async_trait]
pub trait RemotePlaylistSource: Send + Sync {
    /// Fetch the remote playlist identified by `remote_id`.
    ///
    /// # Errors
    ///
    /// [`SyncError::RemoteFetch`] on network failure,
    /// [`SyncError::MalformedRemote`] when the page cannot be parsed.
    async fn fetch_playlist(&self, remote_id: &str) -> Result<RemotePlaylist>;
}

/// Storage collaborator for playlists.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn read_local_playlist(&self, playlist_id: &str) -> Result<LocalPlaylist>;

    /// Persist a sync result.
    ///
    /// Implementations must write inside a single all-or-nothing transaction:
    /// a failure mid-write leaves the prior local state intact.
    async fn write_playlist(&self, playlist_id: &str, result: &PlaylistSyncResult) -> Result<()>;
}

/// Configuration for [`PlaylistSyncService`].
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum number of remote tracks taken per sync.
    pub track_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { track_limit: 200 }
    }
}

impl SyncConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.track_limit == 0 {
            return Err("track_limit must be > 0".to_string());
        }
        Ok(())
    }
}

/// Orchestrates one playlist sync.
///
/// The remote fetch happens first and a failure there aborts the whole sync
/// atomically; the storage write only begins after the merge has completed,
/// inside the store's transaction boundary.
pub struct PlaylistSyncService {
    source: Arc<dyn RemotePlaylistSource>,
    store: Arc<dyn PlaylistStore>,
    config: SyncConfig,
}

impl PlaylistSyncService {
    pub fn new(
        source: Arc<dyn RemotePlaylistSource>,
        store: Arc<dyn PlaylistStore>,
        config: SyncConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    /// Synchronize local playlist `playlist_id` against remote `remote_id`.
    ///
    /// # Errors
    ///
    /// Any failure before the write leaves local state untouched;
    /// cancellation surfaces as [`SyncError::Cancelled`], never as a
    /// generic failure.
    #[instrument(skip(self, cancel))]
    pub async fn sync(
        &self,
        playlist_id: &str,
        remote_id: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaylistSyncResult> {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        let mut remote = tokio::select! {
            _ = cancel.cancelled() => return Err(SyncError::Cancelled),
            fetched = self.source.fetch_playlist(remote_id) => fetched?,
        };

        if remote.tracks.len() > self.config.track_limit {
            debug!(
                dropped = remote.tracks.len() - self.config.track_limit,
                limit = self.config.track_limit,
                "Truncating remote playlist to track limit"
            );
            remote.tracks.truncate(self.config.track_limit);
        }

        let local = self.store.read_local_playlist(playlist_id).await?;
        let result = merge(&remote, &local);

        // Merge is done but nothing is persisted yet; a cancel here still
        // leaves local state untouched.
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        self.store.write_playlist(playlist_id, &result).await?;

        info!(tracks = result.tracks.len(), "Playlist synchronized");
        Ok(result)
    }
}
