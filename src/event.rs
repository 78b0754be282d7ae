//! Event Handling
//!
//! Keyboard and event handling for tadmin.

use crate::app::{App, Mode};
use crate::modal::{ActionKind, ActionModal};
use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use std::time::Duration;

/// Handle events, returns true if app should quit
pub async fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        if let Event::Key(key) = read()? {
            return Ok(handle_key_event(app, key.code, key.modifiers).await);
        }
    }
    Ok(false)
}

/// Apply one key press, returns true if app should quit
pub async fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    // Global quit shortcut
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        Mode::Normal => return handle_normal_mode(app, code).await,
        Mode::Search => handle_search_mode(app, code, modifiers),
        Mode::Modal => handle_modal_mode(app, code, modifiers).await,
        Mode::Help => handle_help_mode(app, code),
    }
    false
}

async fn handle_normal_mode(app: &mut App, code: KeyCode) -> bool {
    match code {
        // Quit
        KeyCode::Char('q') => return true,

        // Navigation - vim style + accessible alternatives
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),

        // Pagination
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right | KeyCode::PageDown => {
            app.next_page();
        },
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left | KeyCode::PageUp => {
            app.previous_page();
        },

        // Refresh / retry
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.fetch_records().await;
        },

        // Search
        KeyCode::Char('/') => app.enter_search_mode(),

        // Record actions
        KeyCode::Char('c') => app.open_modal(ActionKind::Create).await,
        KeyCode::Char('e') => app.open_modal(ActionKind::Update).await,
        KeyCode::Char('v') | KeyCode::Enter => app.open_modal(ActionKind::View).await,
        KeyCode::Char('d') | KeyCode::Delete => app.open_modal(ActionKind::Delete).await,

        // Help
        KeyCode::Char('?') => app.enter_help_mode(),

        KeyCode::Esc => app.notification_manager.dismiss_toast(),

        _ => {},
    }
    false
}

fn handle_search_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => {
            app.table.clear_search();
            app.mode = Mode::Normal;
        },
        KeyCode::Enter => {
            app.mode = Mode::Normal;
        },
        KeyCode::Backspace => {
            app.table.pop_search_char();
        },
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.table.push_search_char(c);
        },
        _ => {},
    }
}

async fn handle_modal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match &mut app.modal {
        ActionModal::Closed => app.exit_mode(),
        ActionModal::View(_) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.exit_mode();
            }
        },
        ActionModal::Create(form) | ActionModal::Update(form) => match code {
            KeyCode::Esc => app.exit_mode(),
            KeyCode::Enter => app.begin_submit(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => form.push_char(c),
            _ => {},
        },
        ActionModal::Delete(_) => match code {
            KeyCode::Char('y') | KeyCode::Enter => app.begin_submit(),
            KeyCode::Char('n') | KeyCode::Esc => app.exit_mode(),
            _ => {},
        },
    }
}

fn handle_help_mode(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
        app.exit_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::model::{Record, RecordId};

    fn app() -> App {
        let client =
            ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let mut app = App::new(client, Config::default(), 10);
        app.records = (1..=25)
            .map(|i| Record {
                id: RecordId::parse(&i.to_string()).unwrap(),
                name: format!("Record {i}"),
            })
            .collect();
        app
    }

    async fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, code, KeyModifiers::NONE).await
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')).await);
        assert!(handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL).await);
    }

    #[tokio::test]
    async fn test_paging_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l')).await;
        press(&mut app, KeyCode::Char(']')).await;
        assert_eq!(app.table.current_page(), 3);
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.table.current_page(), 3);
        press(&mut app, KeyCode::Char('h')).await;
        assert_eq!(app.table.current_page(), 2);
    }

    #[tokio::test]
    async fn test_search_typing_and_escape() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/')).await;
        assert_eq!(app.mode, Mode::Search);

        // 'q' is text while searching
        assert!(!press(&mut app, KeyCode::Char('q')).await);
        press(&mut app, KeyCode::Backspace).await;
        for c in "record 2".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        assert_eq!(app.table.search_term(), "record 2");
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.table.search_term(), "record 2");

        press(&mut app, KeyCode::Char('/')).await;
        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.table.search_term(), "");
    }

    #[tokio::test]
    async fn test_form_typing_and_close() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c')).await;
        assert_eq!(app.mode, Mode::Modal);
        press(&mut app, KeyCode::Char('d')).await;
        press(&mut app, KeyCode::Char('q')).await;
        assert_eq!(app.modal.form_mut().map(|f| f.name.clone()), Some("dq".to_string()));

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.modal.is_open());
    }

    #[tokio::test]
    async fn test_enter_marks_form_pending() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c')).await;
        press(&mut app, KeyCode::Enter).await;
        // Blank name is caught before anything is queued
        assert!(!app.has_pending_submit());

        press(&mut app, KeyCode::Char('x')).await;
        press(&mut app, KeyCode::Enter).await;
        assert!(app.has_pending_submit());
        assert_eq!(app.modal.form_mut().map(|f| f.submit_label()), Some("Saving..."));
    }

    #[tokio::test]
    async fn test_delete_cancel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d')).await;
        assert_eq!(app.modal.kind(), Some(ActionKind::Delete));
        press(&mut app, KeyCode::Char('n')).await;
        assert!(!app.modal.is_open());
        assert_eq!(app.records.len(), 25);
    }

    #[tokio::test]
    async fn test_help_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?')).await;
        assert_eq!(app.mode, Mode::Help);
        press(&mut app, KeyCode::Char('?')).await;
        assert_eq!(app.mode, Mode::Normal);
    }
}
