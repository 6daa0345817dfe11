use futures::future::BoxFuture;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use super::types::{Artwork, ArtworkError, ArtworkOrigin};
use crate::theme::Rgba;

/// One place artwork can be resolved from.
///
/// `Ok(None)` means "not here, try the next source".
pub trait ArtworkSource: Send + Sync {
    fn fetch(&self, key: &str) -> BoxFuture<'static, Result<Option<Artwork>, ArtworkError>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Hex SHA-256 of the key, used as the artwork file stem.
fn key_digest(key: &str) -> String {
    Sha256::digest(key.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Swatch colour taken from the first bytes of a digest.
fn accent_from(digest: &[u8]) -> Rgba {
    Rgba::new(digest[0], digest[1], digest[2], 0xff)
}

// ============================================================================
// Directory Source
// ============================================================================

/// Artwork files stored as `<dir>/<sha256(key)>.{jpg,png}`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    const EXTENSIONS: [&'static str; 2] = ["jpg", "png"];

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Candidate file paths for `key`, in lookup order.
    pub fn paths_for(&self, key: &str) -> Vec<PathBuf> {
        let stem = key_digest(key);
        Self::EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{stem}.{ext}")))
            .collect()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtworkSource for DirectorySource {
    fn fetch(&self, key: &str) -> BoxFuture<'static, Result<Option<Artwork>, ArtworkError>> {
        let key = key.to_string();
        let paths = self.paths_for(&key);
        Box::pin(async move {
            for path in paths {
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        let digest = Sha256::digest(&bytes);
                        return Ok(Some(Artwork {
                            key,
                            accent: accent_from(&digest),
                            origin: ArtworkOrigin::File(path),
                        }));
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(ArtworkError::Io(e)),
                }
            }
            Ok(None)
        })
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

// ============================================================================
// Generated Source
// ============================================================================

/// Placeholder artwork derived from the key itself. Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedSource;

impl ArtworkSource for GeneratedSource {
    fn fetch(&self, key: &str) -> BoxFuture<'static, Result<Option<Artwork>, ArtworkError>> {
        let digest = Sha256::digest(key.as_bytes());
        let artwork = Artwork {
            key: key.to_string(),
            accent: accent_from(&digest),
            origin: ArtworkOrigin::Generated,
        };
        Box::pin(async move { Ok(Some(artwork)) })
    }

    fn name(&self) -> &'static str {
        "generated"
    }
}
