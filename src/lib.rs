//! roster: an artist list/grid with recycled rows and asynchronous artwork.
//!
//! The library holds the list-item caching and view-recycling protocol:
//!
//! - [`catalog`] - the backing artist sequence and its provider trait
//! - [`labels`] - plural label formatting for row subtitles
//! - [`adapter`] - display cache, row views, the row pool and the list adapter
//! - [`artwork`] - the asynchronous image port and its tokio-backed fetcher
//! - [`playback`] - the playback collaborator used by "play on tap"
//!
//! [`app`] and [`ui`] wire these into the ratatui front-end run by `main.rs`.

pub mod adapter;
pub mod app;
pub mod artwork;
pub mod catalog;
pub mod config;
pub mod labels;
pub mod playback;
pub mod theme;
pub mod ui;
pub mod util;
