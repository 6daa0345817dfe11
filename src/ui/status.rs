use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::app::App;

/// Render the status bar: transient message if any, otherwise position and queue.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();

    let text = match &app.status {
        Some((message, _)) => message.clone(),
        None => {
            let count = app.adapter.count();
            let position = if count == 0 { 0 } else { app.viewport.selected() + 1 };
            let mode = if app.adapter.config().extended { "extended" } else { "minimal" };
            let playing = match app.player.now_playing().current() {
                Some(track) => format!(" | track {track}"),
                None => String::new(),
            };
            format!(
                " {position}/{count} | {mode}{playing} | j/k move  Enter play  x rows  r rebuild  R reload  q quit"
            )
        }
    };

    f.render_widget(Paragraph::new(text).style(palette.status_bar), area);
}
