use crate::adapter::ImageSlot;

use super::types::ArtworkEvent;

/// Asynchronous image loading, as seen by the list adapter.
///
/// `load` returns immediately. The slot is filled later, possibly never; an
/// implementation must not write into a slot once it has been re-aimed at a
/// different key.
pub trait ImagePort: Send + Sync {
    fn load(&self, key: &str, target: &mut ImageSlot);

    fn is_configured(&self) -> bool {
        true
    }
}

/// Apply a completion to the slot it names.
///
/// Returns `true` when the slot changed: artwork was written, or a failure
/// ended its pending state. Completions for a key the slot no longer wants
/// are dropped.
pub fn deliver(event: ArtworkEvent, slot: &mut ImageSlot) -> bool {
    match event {
        ArtworkEvent::Loaded { key, artwork, .. } => {
            let written = slot.fill(&key, artwork);
            if !written {
                tracing::trace!(slot = ?slot.id(), key = %key, "Dropped stale artwork");
            }
            written
        }
        ArtworkEvent::Failed { key, error, .. } => {
            tracing::debug!(slot = ?slot.id(), key = %key, error = %error, "Artwork load failed");
            slot.fail(&key)
        }
    }
}
