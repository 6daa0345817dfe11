use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::types::{Artist, ArtistId, TrackId};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in catalog file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Read-only access to the ordered backing sequence of artists.
///
/// `item_at` returns `None` both for null entries and for indices past
/// `count()`; callers that need to tell the two apart compare against `count()`.
pub trait ArtistProvider {
    fn count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<&Artist>;
}

// ============================================================================
// Catalog
// ============================================================================

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    artists: Vec<Option<CatalogEntry>>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(flatten)]
    artist: Artist,
    #[serde(default)]
    tracks: Vec<TrackId>,
}

/// In-memory artist catalog.
///
/// The entry list sits behind an `Arc` so the adapter and the playback
/// collaborator can share one snapshot; replacing the data swaps the whole
/// list, entries are never edited in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    artists: Arc<Vec<Option<Artist>>>,
    tracks: Arc<HashMap<ArtistId, Vec<TrackId>>>,
}

impl Catalog {
    /// Maximum catalog file size (16 MB).
    const MAX_FILE_SIZE: u64 = 16 * 1_048_576;

    pub fn new(artists: Vec<Option<Artist>>) -> Self {
        Self {
            artists: Arc::new(artists),
            tracks: Arc::new(HashMap::new()),
        }
    }

    /// Attach the track listing used by playback.
    pub fn with_tracks(mut self, tracks: HashMap<ArtistId, Vec<TrackId>>) -> Self {
        self.tracks = Arc::new(tracks);
        self
    }

    /// Load a catalog from a JSON file.
    ///
    /// `null` entries in the `artists` array are kept as null backing
    /// entries so row positions match the file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "Catalog file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            artists = catalog.count(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a catalog from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;

        let mut tracks = HashMap::new();
        let artists = file
            .artists
            .into_iter()
            .map(|entry| {
                entry.map(|e| {
                    if !e.tracks.is_empty() {
                        tracks.insert(e.artist.id, e.tracks);
                    }
                    e.artist
                })
            })
            .collect();

        Ok(Self::new(artists).with_tracks(tracks))
    }

    /// Sort by name, case-insensitively, with null entries last.
    pub fn sort_by_name(&mut self) {
        let mut artists = (*self.artists).clone();
        artists.sort_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        self.artists = Arc::new(artists);
    }

    /// Track ids for an artist, empty when the artist has none listed.
    pub fn tracks_for(&self, artist: ArtistId) -> &[TrackId] {
        self.tracks.get(&artist).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn track_index(&self) -> Arc<HashMap<ArtistId, Vec<TrackId>>> {
        Arc::clone(&self.tracks)
    }
}

impl ArtistProvider for Catalog {
    fn count(&self) -> usize {
        self.artists.len()
    }

    fn item_at(&self, index: usize) -> Option<&Artist> {
        self.artists.get(index).and_then(Option::as_ref)
    }
}

impl ArtistProvider for Vec<Option<Artist>> {
    fn count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&Artist> {
        self.get(index).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
{
  "artists": [
    { "id": 7, "name": "Zola Jesus", "albums": 4, "songs": 40, "tracks": [70, 71] },
    null,
    { "id": 3, "name": "air", "albums": 1, "songs": 9 }
  ]
}
"#;

    #[test]
    fn test_from_json_keeps_null_entries_in_place() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.count(), 3);
        assert_eq!(catalog.item_at(0).map(|a| a.id), Some(7));
        assert!(catalog.item_at(1).is_none());
        assert_eq!(catalog.item_at(2).map(|a| a.album_count), Some(1));
    }

    #[test]
    fn test_item_at_out_of_range_is_none() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(catalog.item_at(3).is_none());
        assert!(catalog.item_at(usize::MAX).is_none());
    }

    #[test]
    fn test_tracks_for() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.tracks_for(7), &[70, 71]);
        assert!(catalog.tracks_for(3).is_empty());
        assert!(catalog.tracks_for(999).is_empty());
    }

    #[test]
    fn test_sort_by_name_case_insensitive_nulls_last() {
        let mut catalog = Catalog::from_json(SAMPLE).unwrap();
        catalog.sort_by_name();
        assert_eq!(catalog.item_at(0).map(|a| a.name.as_str()), Some("air"));
        assert_eq!(catalog.item_at(1).map(|a| a.name.as_str()), Some("Zola Jesus"));
        assert!(catalog.item_at(2).is_none());
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let catalog = Catalog::from_json(r#"{"artists":[{"id":1,"name":"X"}]}"#).unwrap();
        let artist = catalog.item_at(0).unwrap();
        assert_eq!(artist.album_count, 0);
        assert_eq!(artist.song_count, 0);
    }

    #[test]
    fn test_invalid_json_returns_parse_error() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Catalog::load(Path::new("/tmp/roster_test_no_such_catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = std::env::temp_dir().join("roster_catalog_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.count(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }
}
