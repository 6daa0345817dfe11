//! Playback collaborator used by "play on tap".
//!
//! The adapter only asks two things: which tracks belong to an artist, and
//! to start playing a list of tracks. `QueuePlayer` answers both from the
//! catalog's track index and keeps the resulting queue in memory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::catalog::{ArtistId, TrackId};

pub trait Playback: Send + Sync {
    /// All track ids belonging to `artist`, in play order.
    fn track_ids_for(&self, artist: ArtistId) -> Vec<TrackId>;

    /// Replace the queue with `ids` and start at `start`.
    fn play_all(&self, ids: &[TrackId], start: usize, shuffle: bool);
}

/// What is currently queued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub queue: Vec<TrackId>,
    pub position: usize,
    pub shuffled: bool,
}

impl NowPlaying {
    pub fn current(&self) -> Option<TrackId> {
        self.queue.get(self.position).copied()
    }
}

/// Artist id to track ids, as built by `Catalog::track_index`.
pub type TrackIndex = Arc<HashMap<ArtistId, Vec<TrackId>>>;

/// In-memory player backed by an artist → tracks index.
#[derive(Debug, Default)]
pub struct QueuePlayer {
    tracks: Mutex<TrackIndex>,
    state: Mutex<NowPlaying>,
}

impl QueuePlayer {
    pub fn new(tracks: TrackIndex) -> Self {
        Self {
            tracks: Mutex::new(tracks),
            state: Mutex::new(NowPlaying::default()),
        }
    }

    /// Swap in the track index of a new catalog.
    ///
    /// The current queue keeps playing; only later lookups see the new index.
    pub fn set_tracks(&self, tracks: TrackIndex) {
        tracing::debug!(artists = tracks.len(), "Replaced track index");
        *self.tracks.lock().unwrap_or_else(PoisonError::into_inner) = tracks;
    }

    /// Snapshot of the current queue.
    pub fn now_playing(&self) -> NowPlaying {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Playback for QueuePlayer {
    fn track_ids_for(&self, artist: ArtistId) -> Vec<TrackId> {
        self.tracks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&artist)
            .cloned()
            .unwrap_or_default()
    }

    fn play_all(&self, ids: &[TrackId], start: usize, shuffle: bool) {
        if ids.is_empty() {
            tracing::debug!("Nothing to play");
            return;
        }

        let mut queue = ids.to_vec();
        // Rotate by a value derived from the ids so a shuffled queue is stable per input.
        if shuffle {
            let seed = ids.iter().fold(0usize, |acc, id| acc.wrapping_add(*id as usize));
            let len = queue.len();
            queue.rotate_left(seed % len);
        }

        let position = start.min(queue.len() - 1);
        tracing::info!(tracks = queue.len(), position, shuffle, "Starting playback");

        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = NowPlaying {
            queue,
            position,
            shuffled: shuffle,
        };
    }
}
