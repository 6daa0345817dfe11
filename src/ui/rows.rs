//! Artist row widget.
//!
//! Draws whatever the adapter bound into each visible `RowView`; no catalog
//! data is read here.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::adapter::{ImageSlot, RowShape, RowView};
use crate::app::App;
use crate::theme::{RowPalette, ThemeVariant};
use crate::util::{sanitize, truncate_to_width};

/// Columns taken by the thumbnail swatch and its gap.
const THUMBNAIL_WIDTH: usize = 3;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();

    let items: Vec<ListItem> = if app.adapter.count() == 0 {
        vec![ListItem::new("No artists")]
    } else {
        app.viewport
            .rows()
            .map(|row| {
                let selected = row.bound_position() == Some(app.viewport.selected());
                row_item(row, selected, &palette, app.theme, area.width as usize)
            })
            .collect()
    };

    f.render_widget(List::new(items), area);
}

/// Two or three lines for one row, depending on its shape.
fn row_item(
    row: &RowView,
    selected: bool,
    palette: &RowPalette,
    theme: ThemeVariant,
    width: usize,
) -> ListItem<'static> {
    let text_width = width.saturating_sub(THUMBNAIL_WIDTH);
    let text = |s: &str| -> String { truncate_to_width(&sanitize(s), text_width).into_owned() };

    let mut lines = vec![
        Line::from(vec![
            thumbnail(&row.image, palette),
            Span::styled(text(row.line_one.text()), palette.line_one),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(THUMBNAIL_WIDTH)),
            Span::styled(text(row.line_two.text()), palette.line_two),
        ]),
    ];

    let mut style = Style::default();
    if row.shape() == RowShape::Extended {
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(THUMBNAIL_WIDTH)),
            Span::styled(text(row.line_three.text()), palette.line_three),
        ]));
        if let Some(tint) = row.overlay.color() {
            let base = row
                .background
                .artwork()
                .map(|art| art.accent)
                .unwrap_or_else(|| theme.backdrop());
            style = style.bg(tint.over(base).to_color());
        }
    }

    if selected {
        style = style.patch(palette.selected);
    }

    ListItem::new(lines).style(style)
}

/// Swatch for a thumbnail slot: artwork accent when loaded, a dim block while
/// pending, a placeholder after a failed load.
fn thumbnail(slot: &ImageSlot, palette: &RowPalette) -> Span<'static> {
    match slot.artwork() {
        Some(art) => Span::styled("██ ", Style::default().fg(art.accent.to_color())),
        None if slot.is_pending() => Span::styled("░░ ", palette.thumbnail_pending),
        None if slot.is_failed() => Span::styled("·· ", palette.thumbnail_pending),
        None => Span::raw("   "),
    }
}
