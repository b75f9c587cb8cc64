use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::mode::Pane;

/// Render the category panel (left pane): the filtered category list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let border_color = if app.focused_pane == Pane::Categories {
        app.mode.color()
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Categories ")
        .border_style(Style::default().fg(border_color));

    let categories = app.dashboard.filtered_categories();

    if categories.is_empty() {
        let message = if app.dashboard.search_term.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No categories yet",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Type :cat <name> to create one",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No categories match",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Esc clears the search",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        };
        let empty = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let style = if idx == app.selected_category {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = format!("{} ({})", category.name, category.widgets.len());
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}
