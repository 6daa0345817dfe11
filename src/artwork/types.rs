use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::adapter::SlotId;
use crate::theme::Rgba;

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("Failed to read artwork: {0}")]
    Io(#[from] std::io::Error),

    #[error("No artwork source produced an image for '{0}'")]
    NotFound(String),

    #[error("Artwork task panicked: {0}")]
    Panicked(String),
}

/// Where a piece of artwork came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkOrigin {
    File(PathBuf),
    Generated,
}

/// A decoded thumbnail, reduced to the swatch the terminal can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artwork {
    /// Lookup key the artwork was resolved for.
    pub key: String,
    pub accent: Rgba,
    pub origin: ArtworkOrigin,
}

/// Completion of an asynchronous load, addressed to one image slot.
#[derive(Debug, Clone)]
pub enum ArtworkEvent {
    Loaded {
        slot: SlotId,
        key: String,
        artwork: Arc<Artwork>,
    },
    Failed {
        slot: SlotId,
        key: String,
        error: String,
    },
}

impl ArtworkEvent {
    pub fn slot(&self) -> SlotId {
        match self {
            Self::Loaded { slot, .. } | Self::Failed { slot, .. } => *slot,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Loaded { key, .. } | Self::Failed { key, .. } => key,
        }
    }
}
