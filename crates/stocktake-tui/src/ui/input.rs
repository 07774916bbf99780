//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes and client operations.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, AuthField, Focus, FormField};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Quantity editing captures everything but submit/cancel
    if app.focus == Focus::Products && app.editing_quantity {
        handle_quantity_input(app, key).await;
        return Ok(false);
    }

    // Global keys
    let products_visible = app.client.product_section_visible();
    match key.code {
        KeyCode::F(1) => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Esc => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Tab => {
            app.focus = app.focus.next(products_visible);
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev(products_visible);
            return Ok(false);
        }
        _ => {}
    }

    match app.focus {
        Focus::Auth => handle_auth_input(app, key).await,
        Focus::AddProduct => handle_form_input(app, key).await,
        Focus::Products => handle_products_input(app, key).await,
    }

    Ok(false)
}

async fn handle_auth_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down => app.auth_focus = app.auth_focus.next(),
        KeyCode::Up => app.auth_focus = app.auth_focus.prev(),
        KeyCode::Left | KeyCode::Right
            if matches!(app.auth_focus, AuthField::Login | AuthField::Register) =>
        {
            app.auth_focus = match app.auth_focus {
                AuthField::Login => AuthField::Register,
                _ => AuthField::Login,
            };
        }
        KeyCode::Enter => match app.auth_focus {
            AuthField::Username => app.auth_focus = AuthField::Password,
            AuthField::Password | AuthField::Login => app.submit_login().await,
            AuthField::Register => app.submit_register().await,
        },
        KeyCode::Backspace => app.pop_auth_char(),
        KeyCode::Char(c) => app.push_auth_char(c),
        _ => {}
    }
}

async fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down => app.form_focus = app.form_focus.next(),
        KeyCode::Up => app.form_focus = app.form_focus.prev(),
        KeyCode::Enter => {
            if app.form_focus == FormField::Submit {
                app.submit_product().await;
            } else {
                app.form_focus = app.form_focus.next();
            }
        }
        KeyCode::Backspace => app.pop_form_char(),
        KeyCode::Char(c) => app.push_form_char(c),
        _ => {}
    }
}

async fn handle_products_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('e') | KeyCode::Enter => {
            if app.selected_card().is_some() {
                app.editing_quantity = true;
            }
        }
        KeyCode::Char('r') => app.refresh_products().await,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        _ => {}
    }
}

async fn handle_quantity_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_quantity().await,
        KeyCode::Esc => app.cancel_quantity_edit(),
        KeyCode::Backspace => app.pop_quantity_char(),
        KeyCode::Char(c) => app.push_quantity_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use stocktake_core::api::ApiClient;
    use stocktake_core::InventoryClient;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let api = ApiClient::new("http://127.0.0.1:1").expect("api client");
        App::with_client(InventoryClient::new(api), String::new())
    }

    #[tokio::test]
    async fn test_typing_fills_auth_fields() {
        let mut app = test_app();
        for c in "amy".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).await.expect("input");
        }
        handle_input(&mut app, key(KeyCode::Enter)).await.expect("input");
        handle_input(&mut app, key(KeyCode::Char('x'))).await.expect("input");

        assert_eq!(app.auth_username, "amy");
        assert_eq!(app.auth_password, "x");
        assert_eq!(app.auth_focus, AuthField::Password);
    }

    #[tokio::test]
    async fn test_tab_stays_on_auth_before_login() {
        let mut app = test_app();
        handle_input(&mut app, key(KeyCode::Tab)).await.expect("input");
        assert_eq!(app.focus, Focus::Auth);
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let mut app = test_app();
        assert!(!handle_input(&mut app, key(KeyCode::Esc)).await.expect("input"));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).await.expect("input"));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Esc)).await.expect("input");
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).await.expect("input"));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let mut app = test_app();
        handle_input(&mut app, key(KeyCode::F(1))).await.expect("input");
        assert_eq!(app.state, AppState::ShowingHelp);

        handle_input(&mut app, key(KeyCode::Char('a'))).await.expect("input");
        assert!(app.auth_username.is_empty());

        handle_input(&mut app, key(KeyCode::Esc)).await.expect("input");
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_blank_login_reports_in_auth_region() {
        let mut app = test_app();
        app.auth_focus = AuthField::Login;
        handle_input(&mut app, key(KeyCode::Enter)).await.expect("input");

        let status = app
            .client
            .status(stocktake_core::status::StatusRegion::Auth)
            .expect("auth status");
        assert_eq!(status.text, "Please enter both username and password");
        assert!(!app.client.product_section_visible());
    }
}
