use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::adapter::{ArtistAdapter, RowPool, Viewport};
use crate::artwork::{ArtworkEvent, ImagePort};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::playback::QueuePlayer;
use crate::theme::ThemeVariant;

/// How long a status message stays on screen.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Terminal front-end state.
pub struct App {
    pub adapter: ArtistAdapter<Catalog>,
    pub pool: RowPool,
    pub viewport: Viewport,
    pub player: Arc<QueuePlayer>,
    pub theme: ThemeVariant,
    pub status: Option<(String, Instant)>,
    pub needs_redraw: bool,
    catalog_path: Option<PathBuf>,
    sort_by_name: bool,
}

impl App {
    /// Build the front-end state and the display cache for `catalog`.
    ///
    /// # Arguments
    /// * `catalog` - Initial backing data, already sorted if the config asks for it
    /// * `config` - Row mode, labels, theme and sort preference
    /// * `image_port` - Artwork loader; `None` gives text-only rows
    pub fn new(
        catalog: Catalog,
        config: &Config,
        image_port: Option<Arc<dyn ImagePort>>,
    ) -> Self {
        let player = Arc::new(QueuePlayer::new(catalog.track_index()));
        let mut adapter = ArtistAdapter::new(catalog, config.adapter_config(), config.labels.clone())
            .with_playback(player.clone());
        if let Some(port) = image_port {
            adapter = adapter.with_image_port(port);
        }
        adapter.build_cache();

        let theme = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        Self {
            adapter,
            pool: RowPool::new(),
            viewport: Viewport::default(),
            player,
            theme,
            status: None,
            needs_redraw: true,
            catalog_path: None,
            sort_by_name: config.sort_by_name,
        }
    }

    /// Remember the file the catalog came from so `reload_catalog` can re-read it.
    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Show `message` in the status bar until it expires.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop an expired status message. Returns whether one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status {
            Some((_, at)) if at.elapsed() >= STATUS_TTL => {
                self.status = None;
                true
            }
            _ => false,
        }
    }

    /// Fit the viewport to a list area `lines` tall.
    pub fn resize(&mut self, lines: u16) {
        let rows = usize::from(lines / self.adapter.row_shape().height());
        self.viewport.set_height(rows, &self.adapter, &mut self.pool);
    }

    /// Move the selection by `delta` rows (negative is up).
    pub fn move_selection(&mut self, delta: isize) {
        self.viewport
            .move_selection(delta, &self.adapter, &mut self.pool);
    }

    /// Jump to `position`, clamped to the last artist.
    pub fn select(&mut self, position: usize) {
        self.viewport.select(position, &self.adapter, &mut self.pool);
    }

    /// Replace the catalog and rebuild everything derived from it.
    ///
    /// The player's track index is swapped before the adapter sees the new
    /// data, so a tap right after the replace resolves against the new tracks.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.player.set_tracks(catalog.track_index());
        self.adapter.set_data(catalog);
        self.rebuild_cache();
    }

    /// Re-read the catalog file and replace the current catalog with it.
    ///
    /// Failures leave the current catalog in place and are reported in the
    /// status bar.
    pub fn reload_catalog(&mut self) {
        let Some(path) = self.catalog_path.clone() else {
            self.set_status("No catalog file to reload");
            return;
        };

        match Catalog::load(&path) {
            Ok(mut catalog) => {
                if self.sort_by_name {
                    catalog.sort_by_name();
                }
                self.replace_catalog(catalog);
                tracing::info!(path = %path.display(), artists = self.adapter.count(), "Reloaded catalog");
                self.set_status(format!("Reloaded {} artists", self.adapter.count()));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to reload catalog");
                self.set_status(format!("Reload failed: {e}"));
            }
        }
    }

    /// Rebuild the display cache and rebind every visible row.
    pub fn rebuild_cache(&mut self) {
        self.adapter.build_cache();
        self.viewport.invalidate(&self.adapter, &mut self.pool);
        self.set_status(format!("Rebuilt {} rows", self.adapter.cache().len()));
    }

    /// Switch between minimal and extended rows.
    pub fn toggle_extended(&mut self) {
        let extended = !self.adapter.config().extended;
        self.adapter.set_extended(extended);
        self.viewport.invalidate(&self.adapter, &mut self.pool);
        self.set_status(if extended { "Extended rows" } else { "Minimal rows" });
    }

    /// Tap the thumbnail of the selected row.
    pub fn tap_selected(&mut self) {
        let Some(row) = self.viewport.selected_row() else {
            return;
        };
        match self.adapter.perform_action(row) {
            Ok(0) => self.set_status("Nothing to play"),
            Ok(tracks) => self.set_status(format!("Playing {tracks} tracks")),
            Err(e) => {
                tracing::debug!(error = %e, "Tap ignored");
                self.set_status(e.to_string());
            }
        }
    }

    /// Apply an artwork completion, redrawing if a visible row changed.
    pub fn handle_artwork(&mut self, event: ArtworkEvent) {
        if self.viewport.deliver(event) {
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{ImageSlot, RowShape};

    const CATALOG: &str = r#"{"artists":[
        {"id":1,"name":"Artist A","albums":3,"songs":12,"tracks":[100,101]},
        {"id":2,"name":"Artist B","albums":1,"songs":1,"tracks":[200]},
        {"id":3,"name":"Artist C","albums":2,"songs":5}
    ]}"#;

    struct NoopPort;

    impl ImagePort for NoopPort {
        fn load(&self, key: &str, target: &mut ImageSlot) {
            target.request(key);
        }
    }

    fn status(app: &App) -> Option<&str> {
        app.status.as_ref().map(|(m, _)| m.as_str())
    }

    fn tappable_app() -> App {
        let config = Config {
            extended: true,
            ..Config::default()
        };
        let mut app = App::new(
            Catalog::from_json(CATALOG).unwrap(),
            &config,
            Some(Arc::new(NoopPort)),
        );
        app.resize(12);
        app
    }

    fn app(extended: bool) -> App {
        let config = Config {
            extended,
            ..Config::default()
        };
        let mut app = App::new(Catalog::from_json(CATALOG).unwrap(), &config, None);
        app.resize(12);
        app
    }

    #[test]
    fn test_resize_fits_rows_to_shape() {
        let minimal = app(false);
        assert_eq!(minimal.viewport.height(), 6);
        let extended = app(true);
        assert_eq!(extended.viewport.height(), 4);
    }

    #[test]
    fn test_toggle_extended_rebinds_rows() {
        let mut app = app(false);
        app.toggle_extended();
        assert!(app.viewport.rows().all(|r| r.shape() == RowShape::Extended));
        assert!(app.status.is_some());
    }

    #[test]
    fn test_tap_without_image_port_has_no_action() {
        let mut app = app(true);
        app.tap_selected();
        assert!(app.player.now_playing().queue.is_empty());
        assert_eq!(
            app.status.as_ref().map(|(m, _)| m.as_str()),
            Some("Row has no action attached")
        );
    }

    #[test]
    fn test_replace_catalog_shrinks_view() {
        let mut app = app(false);
        app.select(2);
        app.replace_catalog(
            Catalog::from_json(r#"{"artists":[{"id":9,"name":"Solo"}]}"#).unwrap(),
        );
        assert_eq!(app.viewport.rows().count(), 1);
        assert_eq!(app.viewport.selected(), 0);
        assert_eq!(
            app.viewport.rows().next().map(|r| r.line_one.text().to_string()),
            Some("Solo".to_string())
        );
    }

    #[test]
    fn test_tap_plays_selected_artist() {
        let mut app = tappable_app();
        app.tap_selected();
        assert_eq!(app.player.now_playing().queue, vec![100, 101]);
        assert_eq!(status(&app), Some("Playing 2 tracks"));
    }

    #[test]
    fn test_tap_artist_without_tracks_reports_nothing_to_play() {
        let mut app = tappable_app();
        app.select(2);
        app.tap_selected();
        assert!(app.player.now_playing().queue.is_empty());
        assert_eq!(status(&app), Some("Nothing to play"));
    }

    #[test]
    fn test_tap_after_replace_uses_new_tracks() {
        let mut app = tappable_app();
        app.replace_catalog(
            Catalog::from_json(r#"{"artists":[{"id":9,"name":"Solo","tracks":[900,901]}]}"#)
                .unwrap(),
        );
        app.tap_selected();
        assert_eq!(app.player.now_playing().queue, vec![900, 901]);
        assert_eq!(status(&app), Some("Playing 2 tracks"));
    }

    #[test]
    fn test_reload_without_path_keeps_catalog() {
        let mut app = app(false);
        app.reload_catalog();
        assert_eq!(app.adapter.count(), 3);
        assert_eq!(status(&app), Some("No catalog file to reload"));
    }

    #[test]
    fn test_reload_reads_file_and_swaps_tracks() {
        let path = std::env::temp_dir().join(format!("roster-reload-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"artists":[{"id":7,"name":"Zed","tracks":[70]},{"id":8,"name":"Abe","tracks":[80,81]}]}"#,
        )
        .unwrap();

        let mut app = tappable_app().with_catalog_path(path.clone());
        app.reload_catalog();
        std::fs::remove_file(&path).unwrap();

        // Default config sorts by name, so "Abe" comes first.
        assert_eq!(app.adapter.count(), 2);
        assert_eq!(status(&app), Some("Reloaded 2 artists"));
        app.tap_selected();
        assert_eq!(app.player.now_playing().queue, vec![80, 81]);
    }

    #[test]
    fn test_reload_failure_keeps_catalog() {
        let path = std::env::temp_dir().join("roster-reload-missing.json");
        let mut app = app(false).with_catalog_path(path);
        app.reload_catalog();
        assert_eq!(app.adapter.count(), 3);
        assert!(status(&app).is_some_and(|m| m.starts_with("Reload failed")));
    }
}
