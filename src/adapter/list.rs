use std::sync::Arc;
use thiserror::Error;

use super::display_cache::DisplayCache;
use super::pool::RowPool;
use super::row_view::{RowAction, RowShape, RowView, ROW_SHAPE_COUNT};
use crate::artwork::ImagePort;
use crate::catalog::{Artist, ArtistId, ArtistProvider};
use crate::labels::{LabelKey, PluralFormatter};
use crate::playback::Playback;
use crate::theme::Rgba;

/// Identity reported for positions that do not resolve to an artist.
pub const NO_ID: i64 = -1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Row is not bound to a position")]
    Unbound,

    #[error("No artist at position {0}")]
    NoItem(usize),

    #[error("Row has no action attached")]
    NoAction,

    #[error("No playback service configured")]
    NoPlayback,
}

/// Construction-time settings for `ArtistAdapter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Extended rows: line three, tinted background artwork, play-on-tap.
    pub extended: bool,
    /// Tint laid over extended rows.
    pub overlay: Rgba,
    /// Label used for line two.
    pub secondary_label: LabelKey,
    /// Label used for line three.
    pub tertiary_label: LabelKey,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            extended: false,
            overlay: Rgba::LIST_ITEM_OVERLAY,
            secondary_label: LabelKey::Albums,
            tertiary_label: LabelKey::Songs,
        }
    }
}

/// Binds cached artist display data to recycled row views.
///
/// Call [`build_cache`](Self::build_cache) after every change of backing
/// data; binding reads only the cache and never formats text itself.
pub struct ArtistAdapter<P: ArtistProvider> {
    provider: P,
    cache: DisplayCache,
    cache_stale: bool,
    config: AdapterConfig,
    formatter: Box<dyn PluralFormatter + Send + Sync>,
    image_port: Option<Arc<dyn ImagePort>>,
    playback: Option<Arc<dyn Playback>>,
}

impl<P: ArtistProvider> ArtistAdapter<P> {
    /// Create an adapter over `provider`.
    ///
    /// The cache starts stale and empty; call `build_cache` before binding.
    ///
    /// # Arguments
    /// * `provider` - Backing sequence of artists, possibly with null entries
    /// * `config` - Row mode, overlay tint and label keys
    /// * `formatter` - Pluralized label source for lines two and three
    pub fn new(
        provider: P,
        config: AdapterConfig,
        formatter: impl PluralFormatter + Send + Sync + 'static,
    ) -> Self {
        Self {
            provider,
            cache: DisplayCache::default(),
            cache_stale: true,
            config,
            formatter: Box::new(formatter),
            image_port: None,
            playback: None,
        }
    }

    /// Attach the artwork loader. A port that reports itself unconfigured is ignored.
    pub fn with_image_port(mut self, port: Arc<dyn ImagePort>) -> Self {
        self.image_port = Some(port);
        self
    }

    /// Attach the service that play-on-tap hands tracks to.
    pub fn with_playback(mut self, playback: Arc<dyn Playback>) -> Self {
        self.playback = Some(playback);
        self
    }

    // ------------------------------------------------------------------------
    // Backing data
    // ------------------------------------------------------------------------

    /// Rebuild the display cache from the current backing data.
    pub fn build_cache(&mut self) {
        self.cache = DisplayCache::build(
            &self.provider,
            &*self.formatter,
            self.config.secondary_label,
            self.config.tertiary_label,
        );
        self.cache_stale = false;
        tracing::debug!(rows = self.cache.len(), "Built display cache");
    }

    /// Swap in new backing data. The cache is stale until the next `build_cache`.
    pub fn set_data(&mut self, provider: P) {
        self.provider = provider;
        self.cache_stale = true;
    }

    /// Drop the backing data and the cache.
    pub fn unload(&mut self)
    where
        P: Default,
    {
        self.provider = P::default();
        self.cache = DisplayCache::default();
        self.cache_stale = false;
    }

    /// True after `set_data` until the next `build_cache`.
    pub fn is_cache_stale(&self) -> bool {
        self.cache_stale
    }

    /// Display records from the last `build_cache`.
    pub fn cache(&self) -> &DisplayCache {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Number of entries in the backing data, null entries included.
    ///
    /// Read live from the provider, so it can disagree with a stale cache.
    pub fn count(&self) -> usize {
        self.provider.count()
    }

    /// Artist at `position`; `None` for null entries and out-of-range positions.
    pub fn item(&self, position: usize) -> Option<&Artist> {
        self.provider.item_at(position)
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Switch between minimal and extended rows. Visible rows must be rebound.
    pub fn set_extended(&mut self, extended: bool) {
        self.config.extended = extended;
    }

    /// True when a configured image port is attached.
    pub fn has_image_port(&self) -> bool {
        self.image_port().is_some()
    }

    fn image_port(&self) -> Option<&Arc<dyn ImagePort>> {
        self.image_port.as_ref().filter(|port| port.is_configured())
    }

    // ------------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------------

    /// Row identity follows the artist id, never the position.
    pub fn has_stable_ids(&self) -> bool {
        true
    }

    /// Number of row shapes the pool must keep separate scrap for.
    pub fn view_type_count(&self) -> usize {
        ROW_SHAPE_COUNT
    }

    /// Shape every row of this adapter is bound as.
    pub fn row_shape(&self) -> RowShape {
        if self.config.extended {
            RowShape::Extended
        } else {
            RowShape::Minimal
        }
    }

    /// Populate a row view for `position`.
    ///
    /// Reuses `recycled` when it has the right shape. Positions without a
    /// cached record (null entry, data shrunk since the last `build_cache`)
    /// produce an empty row. Artwork is requested, never awaited.
    pub fn bind_row(&self, position: usize, recycled: Option<RowView>, pool: &mut RowPool) -> RowView {
        let mut view = pool.obtain(self.row_shape(), recycled);
        view.reset();
        view.bind_to(position);

        let record = if position < self.provider.count() {
            self.cache.get(position)
        } else {
            None
        };
        let Some(record) = record else {
            tracing::debug!(position, "No display record, binding empty row");
            return view;
        };

        view.line_one.set_text(&record.line_one);
        view.line_two.set_text(&record.line_two);

        let Some(port) = self.image_port() else {
            tracing::warn!(position, "Artist adapter has no image port");
            return view;
        };

        // Artwork is keyed by artist name.
        port.load(&record.line_one, &mut view.image);

        if view.shape() == RowShape::Extended {
            view.overlay.set_background_color(self.config.overlay);
            view.line_three.set_text(&record.line_three);
            port.load(&record.line_one, &mut view.background);
            view.thumbnail_action = Some(RowAction::PlayArtist);
        }

        view
    }

    /// Run the thumbnail action of `view` against the position it is bound to now.
    ///
    /// # Returns
    /// The number of tracks handed to playback, which may be zero.
    pub fn perform_action(&self, view: &RowView) -> Result<usize, AdapterError> {
        match view.thumbnail_action {
            Some(RowAction::PlayArtist) => {
                let position = view.bound_position().ok_or(AdapterError::Unbound)?;
                self.play_artist_at(position)
            }
            None => Err(AdapterError::NoAction),
        }
    }

    /// Play every track of the artist currently at `position`, from the first, unshuffled.
    ///
    /// The artist is looked up when called, not when the row was bound.
    ///
    /// # Returns
    /// The number of tracks handed to playback. An artist without tracks
    /// yields `Ok(0)` and leaves the current queue alone.
    pub fn play_artist_at(&self, position: usize) -> Result<usize, AdapterError> {
        let playback = self.playback.as_ref().ok_or(AdapterError::NoPlayback)?;
        let artist = self
            .provider
            .item_at(position)
            .ok_or(AdapterError::NoItem(position))?;

        let tracks = playback.track_ids_for(artist.id);
        tracing::info!(
            position,
            artist_id = artist.id,
            tracks = tracks.len(),
            "Playing artist"
        );
        playback.play_all(&tracks, 0, false);
        Ok(tracks.len())
    }

    /// Artist id at `position`, if it resolves.
    pub fn try_stable_id(&self, position: usize) -> Option<ArtistId> {
        self.provider.item_at(position).map(|artist| artist.id)
    }

    /// Artist id at `position`, or [`NO_ID`].
    pub fn stable_id(&self, position: usize) -> i64 {
        self.try_stable_id(position).unwrap_or(NO_ID)
    }
}
