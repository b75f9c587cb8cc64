use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the command bar (bottom bar)
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.mode {
        AppMode::Command => {
            // Show command input
            Line::from(vec![
                Span::styled(":", Style::default().fg(Color::Yellow)),
                Span::raw(app.command_input.as_str()),
                Span::styled("_", Style::default().fg(Color::Green)), // Cursor
            ])
        }

        AppMode::Search => {
            // Show the live search term
            Line::from(vec![
                Span::styled("/", Style::default().fg(Color::Magenta)),
                Span::raw(app.dashboard.search_term.as_str()),
                Span::styled("_", Style::default().fg(Color::Green)), // Cursor
            ])
        }

        AppMode::Normal | AppMode::Form | AppMode::Move => {
            // Show status message or keybind hints
            if let Some(ref msg) = app.status_message {
                Line::from(msg.as_str())
            } else {
                let hints = match app.mode {
                    AppMode::Normal => {
                        "a: add | e: edit | d: delete | m: move | y: yank | /: search | :: command | Tab: pane | q: quit"
                    }
                    AppMode::Form => "Tab: next field | Ctrl-s: save | Esc: cancel",
                    AppMode::Move => "j/k: pick category | Enter: confirm | Esc: cancel",
                    _ => "",
                };

                Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
            }
        }
    };

    let paragraph = Paragraph::new(content);
    f.render_widget(paragraph, area);
}
