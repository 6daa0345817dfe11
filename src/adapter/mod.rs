//! List adapter and view recycling for the artist screen.
//!
//! # Module Structure
//!
//! - `display_cache` - per-row text formatted once per data change
//! - `row_view` - the reusable row bundle and its slots
//! - `pool` - scrap heaps of row views, keyed by shape
//! - `list` - `ArtistAdapter`: binds cache entries to row views
//! - `viewport` - the on-screen window that drives binding while scrolling
//!
//! Data flows one way: backing sequence → `DisplayCache` (eager, full pass)
//! → `ArtistAdapter::bind_row` (per visible row) → `RowView` → image port.

mod display_cache;
mod list;
mod pool;
mod row_view;
mod viewport;

pub use display_cache::{DisplayCache, DisplayRecord};
pub use list::{AdapterConfig, AdapterError, ArtistAdapter, NO_ID};
pub use pool::{RowPool, MAX_SCRAP_PER_SHAPE};
pub use row_view::{
    ImageSlot, OverlaySlot, RowAction, RowShape, RowView, SlotId, TextSlot, ROW_SHAPE_COUNT,
};
pub use viewport::Viewport;
