//! Asynchronous artwork loading.
//!
//! The adapter only sees [`ImagePort`]: a fire-and-forget `load(key, slot)`.
//! [`ArtworkFetcher`] is the tokio-backed implementation used by the binary:
//!
//! - memory hits fill the slot synchronously
//! - misses spawn one task per key that walks the configured
//!   [`ArtworkSource`]s and reports back over an `ArtworkEvent` channel
//! - the UI thread hands each event to [`deliver`], which refuses to write
//!   into a slot that has since been aimed at a different key

mod fetcher;
mod port;
mod source;
mod types;

pub use fetcher::{ArtworkFetcher, DEFAULT_MEMORY_CACHE_SIZE};
pub use port::{deliver, ImagePort};
pub use source::{ArtworkSource, DirectorySource, GeneratedSource};
pub use types::{Artwork, ArtworkError, ArtworkEvent, ArtworkOrigin};
