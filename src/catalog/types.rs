use serde::Deserialize;

/// Numeric artist identity. Stable across catalog reloads.
pub type ArtistId = i64;

/// Numeric track identity, as handed to the playback collaborator.
pub type TrackId = i64;

/// One catalog entry, as listed by the artist screen.
///
/// `album_count` and `song_count` are only used to format row subtitles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    #[serde(rename = "albums", default)]
    pub album_count: u32,
    #[serde(rename = "songs", default)]
    pub song_count: u32,
}

impl Artist {
    pub fn new(id: ArtistId, name: impl Into<String>, album_count: u32, song_count: u32) -> Self {
        Self {
            id,
            name: name.into(),
            album_count,
            song_count,
        }
    }
}
