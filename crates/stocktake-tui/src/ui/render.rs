use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use stocktake_core::status::StatusRegion;

use crate::app::{App, AppState, AuthField, Focus};

use super::products;
use super::styles;

/// Width of the text inside the auth form fields
const AUTH_FIELD_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Shortcuts
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_shortcuts(frame, app, chunks[2]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Stocktake - Inventory Management";
    let right = match app.client.session().data() {
        Some(data) => format!(
            "Signed in as {} since {}  [F1] Help",
            data.username,
            data.created_at.with_timezone(&Local).format("%H:%M")
        ),
        None => "[F1] Help".to_string(),
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + right.len() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    if !app.client.product_section_visible() {
        let auth_area = centered_rect_fixed(46, 11, area);
        render_auth_panel(frame, app, auth_area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(12)])
        .split(columns[0]);

    render_auth_panel(frame, app, left[0]);
    products::render_add_form(frame, app, left[1]);
    products::render_product_section(frame, app, columns[1]);
}

fn render_auth_panel(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Auth;
    let mut lines = vec![Line::from("")];

    lines.push(auth_field_line(
        "Username",
        &app.auth_username,
        focused && app.auth_focus == AuthField::Username,
    ));
    let masked = "*".repeat(app.auth_password.chars().count());
    lines.push(auth_field_line(
        "Password",
        &masked,
        focused && app.auth_focus == AuthField::Password,
    ));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw("   "),
        button_span("Login", focused && app.auth_focus == AuthField::Login),
        Span::raw("   "),
        button_span("Register", focused && app.auth_focus == AuthField::Register),
    ]));
    lines.push(Line::from(""));
    lines.push(status_line(app, StatusRegion::Auth));

    let title = if app.client.is_authenticated() {
        " Account (signed in) "
    } else {
        " Login / Register "
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn auth_field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let shown: String = value
        .chars()
        .rev()
        .take(AUTH_FIELD_WIDTH)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::styled(format!("   {:<9}[", format!("{}:", label)), styles::muted_style()),
        Span::styled(
            format!("{:<width$}{}", shown, cursor, width = AUTH_FIELD_WIDTH),
            style,
        ),
        Span::styled("]", styles::muted_style()),
    ])
}

/// Button label, marked when focused
pub fn button_span(label: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(format!("[ ▶ {} ◀ ]", label), styles::selected_style())
    } else {
        Span::styled(format!("[   {}   ]", label), styles::list_item_style())
    }
}

/// The visible message of a status region, or an empty line
pub fn status_line(app: &App, region: StatusRegion) -> Line<'static> {
    match app.client.status(region) {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message.text),
            styles::status_style(message.kind),
        )),
        None => Line::from(""),
    }
}

fn render_shortcuts(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.focus {
        Focus::Auth => " ↑/↓ field | Enter select | Tab next panel | Esc quit",
        Focus::AddProduct => " ↑/↓ field | Enter next/submit | Tab next panel | Esc quit",
        Focus::Products if app.editing_quantity => {
            " type quantity | Enter submit | Esc cancel"
        }
        Focus::Products => " ↑/↓ select | e edit quantity | r refresh | Tab next panel | Esc quit",
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, styles::muted_style())))
        .style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 20, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("  Stocktake", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("Tab", "Next panel"),
        help_line("Shift+Tab", "Previous panel"),
        help_line("↑/↓", "Move between fields or products"),
        help_line("Enter", "Activate button / next field"),
        Line::from(""),
        Line::from(Span::styled(" Products", styles::highlight_style())),
        help_line("e", "Edit the selected quantity"),
        help_line("Enter", "Submit the edited quantity"),
        help_line("r", "Reload products"),
        Line::from(""),
        help_line("Esc", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("F1", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
