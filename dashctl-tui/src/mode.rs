/// Application modes (vim-inspired)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Navigate categories and widgets (vim normal mode)
    Normal,

    /// Command input (vim : mode)
    Command,

    /// Incremental search (vim / mode)
    Search,

    /// Widget add/edit form
    Form,

    /// Pick a destination category for a widget move
    Move,
}

impl AppMode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            AppMode::Normal => "NORMAL",
            AppMode::Command => "COMMAND",
            AppMode::Search => "SEARCH",
            AppMode::Form => "FORM",
            AppMode::Move => "MOVE",
        }
    }

    /// Get color for status bar (in ratatui Color enum)
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AppMode::Normal => Color::Cyan,
            AppMode::Command => Color::Yellow,
            AppMode::Search => Color::Magenta,
            AppMode::Form => Color::Green,
            AppMode::Move => Color::Blue,
        }
    }
}

/// Which pane has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    /// Left pane (category list)
    Categories,

    /// Right pane (widgets of the selected category)
    Widgets,
}

impl Pane {
    /// Toggle between panes
    pub fn toggle(&self) -> Self {
        match self {
            Pane::Categories => Pane::Widgets,
            Pane::Widgets => Pane::Categories,
        }
    }
}
