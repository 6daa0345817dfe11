use std::collections::VecDeque;

use super::list::ArtistAdapter;
use super::pool::RowPool;
use super::row_view::{ImageSlot, RowView, SlotId};
use crate::artwork::{deliver, ArtworkEvent};
use crate::catalog::ArtistProvider;

/// The on-screen window of bound rows.
///
/// Holds the `RowView`s for positions `[first, first + height)`. Scrolling
/// hands views that leave the window back as the recycled view for the
/// positions that enter it, so only a screenful of views ever exists.
#[derive(Debug, Default)]
pub struct Viewport {
    rows: VecDeque<RowView>,
    first: usize,
    height: usize,
    selected: usize,
}

impl Viewport {
    /// Create an empty window `height` rows tall. Nothing is bound until `layout`.
    pub fn new(height: usize) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Position of the top visible row.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Window height in rows, not terminal lines.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Position under the selection cursor.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Visible rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.rows.iter()
    }

    /// The row under the selection cursor, if it is on screen.
    pub fn selected_row(&self) -> Option<&RowView> {
        self.rows
            .iter()
            .find(|row| row.bound_position() == Some(self.selected))
    }

    /// Resize the window and rebind if the height changed.
    ///
    /// # Arguments
    /// * `height` - New window height in rows
    /// * `adapter` - Adapter that binds entering positions
    /// * `pool` - Source of views when the window grows, sink when it shrinks
    pub fn set_height<P: ArtistProvider>(
        &mut self,
        height: usize,
        adapter: &ArtistAdapter<P>,
        pool: &mut RowPool,
    ) {
        if height != self.height {
            self.height = height;
            self.layout(adapter, pool);
        }
    }

    /// Move the selection by `delta` rows, scrolling to keep it visible.
    ///
    /// The selection is clamped to the data; an empty list pins it at 0.
    pub fn move_selection<P: ArtistProvider>(
        &mut self,
        delta: isize,
        adapter: &ArtistAdapter<P>,
        pool: &mut RowPool,
    ) {
        let count = adapter.count();
        if count == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.saturating_add_signed(delta).min(count - 1);
        }
        self.ensure_selected_visible();
        self.layout(adapter, pool);
    }

    /// Select `position` (clamped) and scroll to it.
    pub fn select<P: ArtistProvider>(
        &mut self,
        position: usize,
        adapter: &ArtistAdapter<P>,
        pool: &mut RowPool,
    ) {
        self.selected = position.min(adapter.count().saturating_sub(1));
        self.ensure_selected_visible();
        self.layout(adapter, pool);
    }

    /// Scroll the window so that `first` is the top row.
    pub fn scroll_to<P: ArtistProvider>(
        &mut self,
        first: usize,
        adapter: &ArtistAdapter<P>,
        pool: &mut RowPool,
    ) {
        self.first = first;
        self.layout(adapter, pool);
    }

    /// Rebind every visible row in place, e.g. after `build_cache` or a mode switch.
    pub fn invalidate<P: ArtistProvider>(&mut self, adapter: &ArtistAdapter<P>, pool: &mut RowPool) {
        let rows = std::mem::take(&mut self.rows);
        for row in rows {
            match row.bound_position() {
                Some(position) => {
                    let rebound = adapter.bind_row(position, Some(row), pool);
                    self.rows.push_back(rebound);
                }
                None => pool.recycle(row),
            }
        }
        self.layout(adapter, pool);
    }

    /// Bring the bound rows in line with the current window and data size.
    pub fn layout<P: ArtistProvider>(&mut self, adapter: &ArtistAdapter<P>, pool: &mut RowPool) {
        let count = adapter.count();
        let max_first = count.saturating_sub(self.height);
        self.first = self.first.min(max_first);
        self.selected = self.selected.min(count.saturating_sub(1));
        let end = (self.first + self.height).min(count);

        // Views outside the window become the recycled views for entering positions.
        let mut outgoing = Vec::new();
        let mut kept: Vec<Option<RowView>> = (self.first..end).map(|_| None).collect();
        for row in self.rows.drain(..) {
            match row.bound_position() {
                Some(p) if (self.first..end).contains(&p) && kept[p - self.first].is_none() => {
                    kept[p - self.first] = Some(row);
                }
                _ => outgoing.push(row),
            }
        }

        for (offset, slot) in kept.into_iter().enumerate() {
            let position = self.first + offset;
            let row = match slot {
                Some(row) if row.shape() == adapter.row_shape() => row,
                Some(row) => adapter.bind_row(position, Some(row), pool),
                None => adapter.bind_row(position, outgoing.pop(), pool),
            };
            self.rows.push_back(row);
        }

        for row in outgoing {
            pool.recycle(row);
        }
    }

    /// Mutable access to a visible image slot by id.
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ImageSlot> {
        self.rows.iter_mut().find_map(|row| row.slot_mut(id))
    }

    /// Route an artwork completion to its slot.
    ///
    /// # Returns
    /// `true` when a visible slot changed and the frame needs a redraw.
    /// Completions for off-screen or re-aimed slots return `false`.
    pub fn deliver(&mut self, event: ArtworkEvent) -> bool {
        match self.slot_mut(event.slot()) {
            Some(slot) => deliver(event, slot),
            None => {
                tracing::trace!(slot = ?event.slot(), "Artwork for an off-screen slot");
                false
            }
        }
    }

    fn ensure_selected_visible(&mut self) {
        if self.selected < self.first {
            self.first = self.selected;
        } else if self.height > 0 && self.selected >= self.first + self.height {
            self.first = self.selected + 1 - self.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AdapterConfig;
    use crate::catalog::Artist;
    use crate::labels::Labels;

    fn adapter(count: usize, extended: bool) -> ArtistAdapter<Vec<Option<Artist>>> {
        let backing = (0..count)
            .map(|i| Some(Artist::new(i as i64, format!("Artist {i}"), 1, 1)))
            .collect();
        let config = AdapterConfig {
            extended,
            ..AdapterConfig::default()
        };
        let mut adapter = ArtistAdapter::new(backing, config, Labels::default());
        adapter.build_cache();
        adapter
    }

    fn positions(viewport: &Viewport) -> Vec<Option<usize>> {
        viewport.rows().map(RowView::bound_position).collect()
    }

    #[test]
    fn test_layout_binds_window() {
        let adapter = adapter(10, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(4);
        viewport.layout(&adapter, &mut pool);
        assert_eq!(positions(&viewport), vec![Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(pool.allocated(), 4);
    }

    #[test]
    fn test_scrolling_recycles_instead_of_allocating() {
        let adapter = adapter(100, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(5);
        viewport.layout(&adapter, &mut pool);
        for first in 1..60 {
            viewport.scroll_to(first, &adapter, &mut pool);
        }
        assert_eq!(pool.allocated(), 5);
        assert_eq!(viewport.first(), 59);
        assert_eq!(
            viewport.rows().next().map(|r| r.line_one.text().to_string()),
            Some("Artist 59".to_string())
        );
    }

    #[test]
    fn test_scroll_is_clamped_to_data() {
        let adapter = adapter(6, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(4);
        viewport.scroll_to(50, &adapter, &mut pool);
        assert_eq!(viewport.first(), 2);
        assert_eq!(viewport.rows().count(), 4);
    }

    #[test]
    fn test_short_list_binds_only_existing_rows() {
        let adapter = adapter(2, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(8);
        viewport.layout(&adapter, &mut pool);
        assert_eq!(positions(&viewport), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_selection_scrolls_window() {
        let adapter = adapter(20, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(5);
        viewport.layout(&adapter, &mut pool);
        viewport.move_selection(7, &adapter, &mut pool);
        assert_eq!(viewport.selected(), 7);
        assert_eq!(viewport.first(), 3);
        assert_eq!(viewport.selected_row().and_then(RowView::bound_position), Some(7));

        viewport.move_selection(-100, &adapter, &mut pool);
        assert_eq!(viewport.selected(), 0);
        assert_eq!(viewport.first(), 0);

        viewport.select(usize::MAX, &adapter, &mut pool);
        assert_eq!(viewport.selected(), 19);
    }

    #[test]
    fn test_mode_switch_rebinds_with_new_shape() {
        let mut adapter = adapter(10, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(3);
        viewport.layout(&adapter, &mut pool);

        adapter.set_extended(true);
        viewport.invalidate(&adapter, &mut pool);
        assert!(viewport
            .rows()
            .all(|r| r.shape() == crate::adapter::RowShape::Extended));
        assert_eq!(positions(&viewport), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_deliver_to_offscreen_slot_is_ignored() {
        let adapter = adapter(3, false);
        let mut pool = RowPool::new();
        let mut viewport = Viewport::new(3);
        viewport.layout(&adapter, &mut pool);
        let event = ArtworkEvent::Failed {
            slot: SlotId(9_999),
            key: "Artist 0".to_string(),
            error: "gone".to_string(),
        };
        assert!(!viewport.deliver(event));
    }
}
