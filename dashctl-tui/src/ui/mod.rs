pub mod category_panel;
pub mod charts;
pub mod command_bar;
pub mod layout;
pub mod status_bar;
pub mod widget_panel;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the entire UI
pub fn render(f: &mut Frame, app: &mut App) {
    // Get main layout areas
    let (status_area, content_area, command_area) = layout::Layout::main(f.area());

    // Render status bar
    status_bar::render(f, status_area, app);

    // Render command bar
    command_bar::render(f, command_area, app);

    // Split content into panes
    let (category_area, widget_area) = layout::Layout::panes(content_area);

    // Render panels
    category_panel::render(f, category_area, app);
    widget_panel::render(f, widget_area, app);

    // Modal overlays
    match app.mode {
        AppMode::Form => {
            if let Some(form) = app.form.as_mut() {
                let modal = layout::Layout::modal(f.area(), 70, 70);
                f.render_widget(Clear, modal);
                form.render(f, modal);
            }
        }
        AppMode::Move => render_move_picker(f, app),
        _ => {}
    }
}

/// Destination picker for a widget move
fn render_move_picker(f: &mut Frame, app: &App) {
    let modal = layout::Layout::modal(f.area(), 40, 40);
    f.render_widget(Clear, modal);

    let items: Vec<ListItem> = app
        .dashboard
        .categories
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let style = if idx == app.move_target {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(category.name.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Move to category ")
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(list, modal);
}
