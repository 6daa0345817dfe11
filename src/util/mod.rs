//! Text helpers for drawing catalog strings in a terminal.

mod text;

pub use text::{sanitize, truncate_to_width};
