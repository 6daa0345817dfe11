//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyModifiers};

use super::loop_runner::Action;
use crate::app::App;

/// Rows moved by PageUp/PageDown when the viewport is empty.
const FALLBACK_PAGE: usize = 10;

pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    let page = (match app.viewport.height() {
        0 => FALLBACK_PAGE,
        h => h,
    }) as isize;

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::PageDown => app.move_selection(page),
        KeyCode::PageUp => app.move_selection(-page),
        KeyCode::Char('g') | KeyCode::Home => app.select(0),
        KeyCode::Char('G') | KeyCode::End => app.select(usize::MAX),
        KeyCode::Enter => app.tap_selected(),
        KeyCode::Char('x') => app.toggle_extended(),
        KeyCode::Char('r') => app.rebuild_cache(),
        KeyCode::Char('R') => app.reload_catalog(),
        _ => {}
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Config;

    fn app() -> App {
        let catalog = Catalog::from_json(
            r#"{"artists":[{"id":1,"name":"A"},{"id":2,"name":"B"},{"id":3,"name":"C"}]}"#,
        )
        .unwrap();
        let mut app = App::new(catalog, &Config::default(), None);
        app.resize(4);
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(matches!(handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit));
        assert!(matches!(handle_input(&mut app, KeyCode::Esc, KeyModifiers::NONE), Action::Quit));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.viewport.selected(), 1);
        handle_input(&mut app, KeyCode::Char('G'), KeyModifiers::NONE);
        assert_eq!(app.viewport.selected(), 2);
        assert_eq!(app.viewport.first(), 1);
        handle_input(&mut app, KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(app.viewport.selected(), 0);
    }

    #[test]
    fn test_toggle_key() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(app.adapter.config().extended);
    }

    #[test]
    fn test_reload_key_without_catalog_file() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(
            app.status.as_ref().map(|(m, _)| m.as_str()),
            Some("No catalog file to reload")
        );
    }
}
