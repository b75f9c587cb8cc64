use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use dashctl_core::{content, Category, Dashboard, StateFile, Widget, WidgetDraft};

use crate::form::{FormAction, FormTarget, WidgetForm};
use crate::mode::{AppMode, Pane};

/// Main application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Which pane has focus
    pub focused_pane: Pane,

    /// The widget store state
    pub dashboard: Dashboard,

    /// Where the dashboard persists after every mutation
    pub state_file: StateFile,

    /// Selection into the filtered category list
    pub selected_category: usize,

    /// Selection into the current category's widget list
    pub selected_widget: usize,

    /// Command input buffer
    pub command_input: String,

    /// Move-mode selection into the full category list
    pub move_target: usize,

    /// Open widget form, when in Form mode
    pub form: Option<WidgetForm>,

    /// Internal yank register for widget content
    pub yank: Option<String>,

    /// Status message (shown in command bar)
    pub status_message: Option<String>,

    /// Should quit?
    pub should_quit: bool,
}

impl App {
    /// Create a new App, loading state from the file (seeding defaults if
    /// the file is missing or unreadable)
    pub fn new(state_file: StateFile) -> Self {
        let dashboard = state_file.load_or_seed();
        Self {
            mode: AppMode::Normal,
            focused_pane: Pane::Categories,
            dashboard,
            state_file,
            selected_category: 0,
            selected_widget: 0,
            command_input: String::new(),
            move_target: 0,
            form: None,
            yank: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// The category currently selected in the filtered view
    pub fn current_category(&self) -> Option<&Category> {
        self.dashboard
            .filtered_categories()
            .get(self.selected_category)
            .copied()
    }

    /// The widget currently selected within the current category
    pub fn current_widget(&self) -> Option<&Widget> {
        self.current_category()?.widgets.get(self.selected_widget)
    }

    fn current_category_id(&self) -> Option<String> {
        self.current_category().map(|c| c.id.clone())
    }

    /// Persist after a successful mutation. Best-effort; failures are
    /// logged inside the adapter and never interrupt the user.
    fn persist(&self) {
        self.state_file.save(&self.dashboard);
    }

    /// Keep selections inside the filtered lists after any change
    fn clamp_selection(&mut self) {
        let categories = self.dashboard.filtered_categories().len();
        if self.selected_category >= categories {
            self.selected_category = categories.saturating_sub(1);
        }
        let widgets = self.current_category().map_or(0, |c| c.widgets.len());
        if self.selected_widget >= widgets {
            self.selected_widget = widgets.saturating_sub(1);
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            AppMode::Normal => self.handle_normal_mode(key),
            AppMode::Command => self.handle_command_mode(key),
            AppMode::Search => self.handle_search_mode(key),
            AppMode::Form => self.handle_form_mode(key),
            AppMode::Move => self.handle_move_mode(key),
        }
        Ok(())
    }

    /// Handle normal mode keys
    fn handle_normal_mode(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.should_quit = true;
            }

            // Enter command mode
            (KeyCode::Char(':'), _) => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }

            // Enter search mode
            (KeyCode::Char('/'), _) => {
                self.mode = AppMode::Search;
            }

            // Toggle pane focus
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.focused_pane = self.focused_pane.toggle();
            }

            // Navigate
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.select_next();
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.select_previous();
            }

            // Add widget to the current category
            (KeyCode::Char('a'), KeyModifiers::NONE) => match self.current_category_id() {
                Some(category_id) => {
                    self.form = Some(WidgetForm::add(category_id));
                    self.mode = AppMode::Form;
                    self.status_message = None;
                }
                None => {
                    self.status_message = Some("No category selected".to_string());
                }
            },

            // Edit the current widget
            (KeyCode::Char('e'), KeyModifiers::NONE) => {
                match (self.current_category_id(), self.current_widget()) {
                    (Some(category_id), Some(widget)) => {
                        self.form = Some(WidgetForm::edit(category_id, widget));
                        self.mode = AppMode::Form;
                        self.status_message = None;
                    }
                    _ => {
                        self.status_message = Some("No widget selected".to_string());
                    }
                }
            }

            // Delete the current widget
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                if let (Some(category_id), Some(widget)) =
                    (self.current_category_id(), self.current_widget())
                {
                    let widget_id = widget.id.clone();
                    let title = widget.title.clone();
                    match self.dashboard.remove_widget(&category_id, &widget_id) {
                        Ok(()) => {
                            self.persist();
                            self.status_message = Some(format!("Removed widget '{}'", title));
                        }
                        Err(err) => self.status_message = Some(err.to_string()),
                    }
                    self.clamp_selection();
                } else {
                    self.status_message = Some("No widget selected".to_string());
                }
            }

            // Delete the current category
            (KeyCode::Char('D'), KeyModifiers::SHIFT) => {
                if let Some(category) = self.current_category() {
                    let id = category.id.clone();
                    let name = category.name.clone();
                    match self.dashboard.remove_category(&id) {
                        Ok(()) => {
                            self.persist();
                            self.status_message = Some(format!("Removed category '{}'", name));
                        }
                        Err(err) => self.status_message = Some(err.to_string()),
                    }
                    self.clamp_selection();
                } else {
                    self.status_message = Some("No category selected".to_string());
                }
            }

            // Move the current widget to another category
            (KeyCode::Char('m'), KeyModifiers::NONE) => {
                if self.current_widget().is_some() {
                    self.move_target = self
                        .current_category_id()
                        .and_then(|id| self.dashboard.categories.iter().position(|c| c.id == id))
                        .unwrap_or(0);
                    self.mode = AppMode::Move;
                    self.status_message =
                        Some("Select destination: j/k move, Enter confirm, Esc cancel".to_string());
                } else {
                    self.status_message = Some("No widget selected".to_string());
                }
            }

            // Yank the current widget's content
            (KeyCode::Char('y'), KeyModifiers::NONE) => match self.current_widget() {
                Some(widget) => {
                    let text = content::to_editable_string(&widget.content);
                    let title = widget.title.clone();
                    self.yank = Some(text);
                    self.status_message = Some(format!("Copied '{}' content", title));
                }
                None => {
                    self.status_message = Some("No widget selected".to_string());
                }
            },

            // Reload from disk
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                self.dashboard = self.state_file.load_or_seed();
                self.clamp_selection();
                self.status_message = Some("Reloaded".to_string());
            }

            // Clear search
            (KeyCode::Esc, _) => {
                if !self.dashboard.search_term.is_empty() {
                    self.dashboard.set_search_term("");
                    self.clamp_selection();
                    self.status_message = Some("Search cleared".to_string());
                }
            }

            _ => {}
        }
    }

    /// Handle command mode keys
    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            // Cancel command
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }

            // Execute command
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }

            // Backspace
            KeyCode::Backspace => {
                self.command_input.pop();
            }

            // Type characters
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }

            _ => {}
        }
    }

    /// Handle search mode keys (incremental: the term updates as typed)
    fn handle_search_mode(&mut self, key: KeyEvent) {
        match key.code {
            // Keep the term
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }

            // Drop the term
            KeyCode::Esc => {
                self.dashboard.set_search_term("");
                self.clamp_selection();
                self.mode = AppMode::Normal;
            }

            KeyCode::Backspace => {
                let mut term = self.dashboard.search_term.clone();
                term.pop();
                self.dashboard.set_search_term(term);
                self.clamp_selection();
            }

            KeyCode::Char(c) => {
                let mut term = self.dashboard.search_term.clone();
                term.push(c);
                self.dashboard.set_search_term(term);
                self.clamp_selection();
            }

            _ => {}
        }
    }

    /// Handle form mode keys (delegates to the open form)
    fn handle_form_mode(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.mode = AppMode::Normal;
            return;
        };

        match form.handle_key(key) {
            FormAction::None => {}
            FormAction::Cancel => {
                self.form = None;
                self.mode = AppMode::Normal;
            }
            FormAction::Submit => self.submit_form(),
        }
    }

    /// Handle move mode keys
    fn handle_move_mode(&mut self, key: KeyEvent) {
        let count = self.dashboard.categories.len();
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.status_message = None;
            }

            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 {
                    self.move_target = (self.move_target + 1) % count;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if count > 0 {
                    self.move_target = (self.move_target + count - 1) % count;
                }
            }

            KeyCode::Enter => {
                self.execute_move();
                self.mode = AppMode::Normal;
            }

            _ => {}
        }
    }

    /// Validate and apply the open form
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let title = form.title.trim().to_string();
        let raw = form.content_str();
        if title.is_empty() {
            form.error = Some("Title must not be empty".to_string());
            return;
        }
        if raw.trim().is_empty() {
            form.error = Some("Content must not be empty".to_string());
            return;
        }

        // The form boundary: malformed JSON or wrong shape stops here,
        // the store is untouched.
        let parsed = match content::parse_content(form.kind, &raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                form.error = Some(err.to_string());
                return;
            }
        };

        let target = form.target.clone();
        let result = match target {
            FormTarget::Add { category_id } => self
                .dashboard
                .add_widget(&category_id, WidgetDraft::new(title.clone(), parsed))
                .map(|_| format!("Added widget '{}'", title)),
            FormTarget::Edit {
                category_id,
                widget_id,
            } => self
                .dashboard
                .update_widget(
                    &category_id,
                    Widget {
                        id: widget_id,
                        title: title.clone(),
                        content: parsed,
                    },
                )
                .map(|_| format!("Updated widget '{}'", title)),
        };

        match result {
            Ok(message) => {
                self.persist();
                self.status_message = Some(message);
                self.form = None;
                self.mode = AppMode::Normal;
                self.clamp_selection();
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
            }
        }
    }

    /// Apply a pending widget move
    fn execute_move(&mut self) {
        let (Some(from), Some(widget)) = (self.current_category_id(), self.current_widget())
        else {
            self.status_message = Some("No widget selected".to_string());
            return;
        };
        let widget_id = widget.id.clone();
        let Some(target) = self.dashboard.categories.get(self.move_target) else {
            self.status_message = Some("No destination category".to_string());
            return;
        };
        let to = target.id.clone();
        let to_name = target.name.clone();

        match self.dashboard.move_widget(&from, &widget_id, &to) {
            Ok(_) => {
                self.persist();
                self.clamp_selection();
                self.status_message = Some(format!("Moved widget to '{}'", to_name));
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Execute a command
    fn execute_command(&mut self) {
        let cmd = self.command_input.trim().to_string();
        let (verb, rest) = match cmd.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (cmd.as_str(), ""),
        };

        match verb {
            "q" | "quit" => {
                self.should_quit = true;
            }

            "cat" | "category" => {
                if rest.is_empty() {
                    self.status_message = Some("Usage: :cat <name>".to_string());
                } else {
                    self.dashboard.add_category(rest);
                    self.persist();
                    self.status_message = Some(format!("Added category '{}'", rest));
                }
            }

            "rmcat" => {
                if let Some(category) = self.current_category() {
                    let id = category.id.clone();
                    let name = category.name.clone();
                    match self.dashboard.remove_category(&id) {
                        Ok(()) => {
                            self.persist();
                            self.clamp_selection();
                            self.status_message = Some(format!("Removed category '{}'", name));
                        }
                        Err(err) => self.status_message = Some(err.to_string()),
                    }
                } else {
                    self.status_message = Some("No category selected".to_string());
                }
            }

            "" => {}

            _ => {
                self.status_message = Some(format!("Unknown command: {}", cmd));
            }
        }
    }

    /// Move selection down in the focused pane
    fn select_next(&mut self) {
        match self.focused_pane {
            Pane::Categories => {
                let count = self.dashboard.filtered_categories().len();
                if self.selected_category + 1 < count {
                    self.selected_category += 1;
                    self.selected_widget = 0;
                }
            }
            Pane::Widgets => {
                let count = self.current_category().map_or(0, |c| c.widgets.len());
                if self.selected_widget + 1 < count {
                    self.selected_widget += 1;
                }
            }
        }
    }

    /// Move selection up in the focused pane
    fn select_previous(&mut self) {
        match self.focused_pane {
            Pane::Categories => {
                if self.selected_category > 0 {
                    self.selected_category -= 1;
                    self.selected_widget = 0;
                }
            }
            Pane::Widgets => {
                if self.selected_widget > 0 {
                    self.selected_widget -= 1;
                }
            }
        }
    }

    /// Poll for events with timeout
    pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(dir: &std::path::Path) -> App {
        App::new(StateFile::new(dir.join("state.json")))
    }

    #[test]
    fn test_starts_with_seed_data() {
        let dir = tempdir().unwrap();
        let app = app_in(dir.path());
        assert_eq!(app.dashboard.categories.len(), 3);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_search_mode_filters_incrementally() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());

        app.handle_key_event(key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.mode, AppMode::Search);
        for c in "registry".chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.dashboard.filtered_categories().len(), 1);
        assert_eq!(
            app.current_category().unwrap().name,
            "Registry Scan"
        );

        // Esc drops the term
        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.dashboard.search_term.is_empty());
    }

    #[test]
    fn test_command_adds_category_and_persists() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());

        app.handle_key_event(key(KeyCode::Char(':'))).unwrap();
        for c in "cat Network".chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.dashboard.categories.len(), 4);
        assert_eq!(app.dashboard.categories[3].name, "Network");

        // Mutation reached the state file
        let reloaded = StateFile::new(dir.path().join("state.json")).load_or_seed();
        assert_eq!(reloaded.categories.len(), 4);
    }

    #[test]
    fn test_delete_widget_updates_state_and_selection() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let before = app.current_category().unwrap().widgets.len();

        app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.current_category().unwrap().widgets.len(), before - 1);
        assert!(app.status_message.as_deref().unwrap().contains("Removed"));
    }

    #[test]
    fn test_form_submit_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let widgets_before = app.current_category().unwrap().widgets.len();

        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.mode, AppMode::Form);

        // Title, then switch kind to donut, then clobber the payload
        {
            let form = app.form.as_mut().unwrap();
            form.title = "Broken".into();
            form.kind = dashctl_core::WidgetKind::Donut;
            form.content = tui_textarea::TextArea::from(["{oops".to_string()]);
        }
        app.handle_key_event(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        ))
        .unwrap();

        // Form stays open with an error; store untouched
        assert_eq!(app.mode, AppMode::Form);
        assert!(app.form.as_ref().unwrap().error.is_some());
        assert_eq!(app.current_category().unwrap().widgets.len(), widgets_before);
    }

    #[test]
    fn test_form_submit_adds_text_widget() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let widgets_before = app.current_category().unwrap().widgets.len();

        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        for c in "Notes".chars() {
            app.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        {
            let form = app.form.as_mut().unwrap();
            form.content = tui_textarea::TextArea::from(["remember the milk".to_string()]);
        }
        app.handle_key_event(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        ))
        .unwrap();

        assert_eq!(app.mode, AppMode::Normal);
        let widgets = &app.current_category().unwrap().widgets;
        assert_eq!(widgets.len(), widgets_before + 1);
        assert_eq!(widgets.last().unwrap().title, "Notes");
    }

    #[test]
    fn test_move_widget_between_categories() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let source_widgets = app.current_category().unwrap().widgets.len();

        app.handle_key_event(key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.mode, AppMode::Move);
        app.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            app.dashboard.categories[0].widgets.len(),
            source_widgets - 1
        );
        assert_eq!(app.dashboard.categories[1].widgets.len(), 3);
    }

    #[test]
    fn test_yank_fills_register() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());

        app.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        let yanked = app.yank.as_deref().unwrap();
        assert!(yanked.contains("Connected"));

        // Status names the widget the register was filled from
        let title = app.current_widget().unwrap().title.clone();
        let message = app.status_message.as_deref().unwrap();
        assert!(message.contains(&title));
    }

    #[test]
    fn test_quit_via_command() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_key_event(key(KeyCode::Char(':'))).unwrap();
        app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(app.should_quit);
    }
}
