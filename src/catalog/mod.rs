//! The backing artist sequence.
//!
//! - [`types`] - `Artist` and the id aliases
//! - [`store`] - the `ArtistProvider` trait and the in-memory `Catalog`

mod store;
mod types;

pub use store::{ArtistProvider, Catalog, CatalogError};
pub use types::{Artist, ArtistId, TrackId};
