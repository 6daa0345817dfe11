//! Frame layout for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{rows, status};
use crate::app::App;

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 30;
pub(super) const MIN_HEIGHT: u16 = 6;

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let palette = app.theme.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.panel_border)
        .title(format!("Artists ({})", app.adapter.count()));
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    // Bind rows for the current size before drawing them.
    app.resize(inner.height);
    rows::render(f, app, inner);
    status::render(f, app, chunks[1]);
}
