use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use stocktake_core::status::StatusRegion;
use stocktake_core::utils::truncate_string;
use stocktake_core::view::{ProductCard, ProductListView};

use crate::app::{form_value, App, Focus, FormField};

use super::render::{button_span, status_line};
use super::styles;

/// Width of the value column in the add-product form
const FORM_VALUE_WIDTH: usize = 24;

pub fn render_add_form(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::AddProduct;
    let mut lines = vec![Line::from("")];

    for field in FormField::ALL {
        let field_focused = focused && app.form_focus == field;
        if field == FormField::Submit {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("   "),
                button_span(field.label(), field_focused),
            ]));
            continue;
        }

        let style = if field_focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let value = truncate_string(form_value(&app.product_form, field), FORM_VALUE_WIDTH);
        let cursor = if field_focused { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", field.label()), styles::muted_style()),
            Span::styled(format!("{}{}", value, cursor), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " * required",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Add Product ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Statistics strip, product status region and the card list
pub fn render_product_section(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Length(1), // Product status region
            Constraint::Min(5),    // Cards
        ])
        .split(area);

    render_stats(frame, app, chunks[0]);
    frame.render_widget(
        Paragraph::new(status_line(app, StatusRegion::Product)),
        chunks[1],
    );
    render_product_list(frame, app, chunks[2]);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.client.stats();
    let line = Line::from(vec![
        Span::styled(" Total Products: ", styles::muted_style()),
        Span::styled(stats.total_count.to_string(), styles::highlight_style()),
        Span::styled("   Total Value: ", styles::muted_style()),
        Span::styled(stats.total_value_display(), styles::highlight_style()),
        Span::styled("   Low Stock: ", styles::muted_style()),
        Span::styled(
            stats.low_stock_count.to_string(),
            styles::quantity_style(stats.low_stock_count > 0),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_product_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Products;
    let view = app.client.view();

    let block = Block::default()
        .title(format!(" Products ({}) ", view.cards().len()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));

    let cards = match view {
        ProductListView::Empty { message } => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(format!("  {}", message), styles::muted_style())),
            ])
            .wrap(Wrap { trim: false })
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        ProductListView::Cards(cards) => cards,
    };

    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let selected = i == app.product_selection;
            let editing = selected && focused && app.editing_quantity;
            let item = ListItem::new(card_lines(card, app.quantity_input(card), editing));
            if selected && focused {
                item.style(styles::selected_style())
            } else {
                item.style(styles::list_item_style())
            }
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.product_selection));

    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn card_lines(card: &ProductCard, quantity_input: &str, editing: bool) -> Vec<Line<'static>> {
    let mut name_spans = vec![Span::styled(format!(" {}", card.name), styles::title_style())];
    if card.low_stock {
        name_spans.push(Span::styled("  LOW STOCK", styles::error_style()));
    }

    let input_style = if editing {
        styles::selected_style()
    } else {
        styles::muted_style()
    };
    let cursor = if editing { "▌" } else { "" };

    vec![
        Line::from(name_spans),
        Line::from(vec![
            Span::styled("   Type: ", styles::muted_style()),
            Span::raw(card.product_type.clone()),
            Span::styled("   SKU: ", styles::muted_style()),
            Span::raw(card.sku.clone()),
            Span::styled("   Price: ", styles::muted_style()),
            Span::raw(card.price.clone()),
        ]),
        Line::from(vec![
            Span::styled("   Quantity: ", styles::muted_style()),
            Span::styled(card.quantity.to_string(), styles::quantity_style(card.low_stock)),
            Span::styled("   New qty: [", styles::muted_style()),
            Span::styled(format!("{}{}", quantity_input, cursor), input_style),
            Span::styled("] ", styles::muted_style()),
            Span::styled("Update Qty", styles::highlight_style()),
        ]),
        Line::from(vec![
            Span::styled("   Description: ", styles::muted_style()),
            Span::raw(card.description.clone()),
        ]),
        Line::from(""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(low_stock: bool) -> ProductCard {
        ProductCard {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            product_type: "Hardware".to_string(),
            sku: "W-1".to_string(),
            price: "$2.50".to_string(),
            quantity: if low_stock { 2 } else { 20 },
            low_stock,
            description: "No description".to_string(),
            quantity_input: "2".to_string(),
        }
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect()
    }

    #[test]
    fn test_card_lines_flag_low_stock() {
        let low = text(&card_lines(&card(true), "2", false));
        assert!(low.contains("LOW STOCK"));

        let plenty = text(&card_lines(&card(false), "20", false));
        assert!(!plenty.contains("LOW STOCK"));
        assert!(plenty.contains("Quantity: 20"));
    }

    #[test]
    fn test_card_lines_show_pending_quantity() {
        let rendered = text(&card_lines(&card(true), "15", true));
        assert!(rendered.contains("New qty: [15▌]"));
        assert!(rendered.contains("Price: $2.50"));
    }
}
