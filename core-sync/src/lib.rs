//! # Playlist Reconciliation
//!
//! Merges a freshly fetched remote track list with a pre-existing local one.
//!
//! ## Overview
//!
//! Remote is the source of truth for ordering and membership of the shared
//! subset; local-only entries (offline imports, manual additions) are
//! preserved but demoted to the tail so a re-sync with an unchanged remote
//! is a no-op. The merge itself is pure ([`reconciler::merge`]); the
//! surrounding [`PlaylistSyncService`] owns the failure semantics: a failed
//! remote fetch aborts the whole sync before anything is written, and the
//! final write goes through the storage collaborator's transaction boundary.
//!
//! ## Components
//!
//! - **Models** (`model`): tracks, playlists, and the sync result
//! - **Reconciler** (`reconciler`): the pure merge rule
//! - **Sync Service** (`service`): fetch → merge → transactional write

pub mod error;
pub mod model;
pub mod reconciler;
pub mod service;

pub use error::{Result, SyncError};
pub use model::{LocalPlaylist, PlaylistSyncResult, RemotePlaylist, Track, TrackId};
pub use reconciler::merge;
pub use service::{PlaylistStore, PlaylistSyncService, RemotePlaylistSource, SyncConfig};
