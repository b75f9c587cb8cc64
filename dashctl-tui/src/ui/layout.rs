use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout manager for the TUI
pub struct Layout;

impl Layout {
    /// Create the main layout with status bar, content area, and command bar
    ///
    /// Returns: (status_area, content_area, command_area)
    pub fn main(area: Rect) -> (Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Status bar
                Constraint::Min(0),    // Content area
                Constraint::Length(1), // Command bar
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2])
    }

    /// Split content area into two panes (categories left, widgets right)
    ///
    /// Returns: (category_area, widget_area)
    pub fn panes(area: Rect) -> (Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30), // Category panel (left)
                Constraint::Percentage(70), // Widget panel (right)
            ])
            .split(area);

        (chunks[0], chunks[1])
    }

    /// Centered modal rectangle within an area
    pub fn modal(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let vertical = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        let horizontal = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1]);

        horizontal[1]
    }
}
