//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - main event loop and terminal management
//! - `input` - keyboard input handling
//! - `render` - frame layout
//! - `rows` - the artist row widget, drawn from bound `RowView`s
//! - `status` - status bar widget

mod input;
mod loop_runner;
mod render;
mod rows;
mod status;

pub use loop_runner::{run, Action};
