use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use dashctl_core::Widget;

use crate::app::App;
use crate::mode::Pane;
use crate::ui::charts;

/// Render the widget panel (right pane): the selected category's widget
/// list plus the selected widget's content
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let border_color = if app.focused_pane == Pane::Widgets {
        app.mode.color()
    } else {
        Color::DarkGray
    };

    let Some(category) = app.current_category() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Widgets ")
            .border_style(Style::default().fg(border_color));
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No category selected",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(empty, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", category.name))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if category.widgets.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No widgets yet",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press 'a' to add a widget",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    // Widget list on top, selected widget's content below
    let list_height = (category.widgets.len() as u16).min(6);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(list_height + 1), Constraint::Min(4)])
        .split(inner);

    let items: Vec<ListItem> = category
        .widgets
        .iter()
        .enumerate()
        .map(|(idx, widget)| render_widget_item(widget, idx == app.selected_widget))
        .collect();
    f.render_widget(List::new(items), chunks[0]);

    if let Some(widget) = category.widgets.get(app.selected_widget) {
        let content_block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", widget.title))
            .border_style(Style::default().fg(Color::DarkGray));
        let content_area = content_block.inner(chunks[1]);
        f.render_widget(content_block, chunks[1]);
        charts::render_content(f, content_area, widget);
    }
}

/// Render a single widget as a list item
fn render_widget_item(widget: &Widget, is_selected: bool) -> ListItem<'_> {
    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("  {} ", widget.title), style),
        Span::styled(
            format!("[{}]", widget.kind()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(line)
}
