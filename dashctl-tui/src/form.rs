//! Widget add/edit form.
//!
//! Collects title, kind, and content as text. Chart content is JSON that
//! gets parsed and validated at submit time; a rejected payload keeps the
//! form open with the error shown, and never reaches the store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use dashctl_core::{content, Widget, WidgetKind};

/// What the form will do on submit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormTarget {
    Add { category_id: String },
    Edit { category_id: String, widget_id: String },
}

/// Which form field has the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Kind,
    Content,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Kind,
            FormField::Kind => FormField::Content,
            FormField::Content => FormField::Title,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Content,
            FormField::Kind => FormField::Title,
            FormField::Content => FormField::Kind,
        }
    }
}

/// Outcome of a key event while the form is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

/// Form state for adding or editing a widget
pub struct WidgetForm {
    pub target: FormTarget,
    pub field: FormField,
    pub title: String,
    pub kind: WidgetKind,
    pub content: TextArea<'static>,
    pub error: Option<String>,
}

impl WidgetForm {
    /// Empty form for a new widget in the given category
    pub fn add(category_id: impl Into<String>) -> Self {
        Self {
            target: FormTarget::Add {
                category_id: category_id.into(),
            },
            field: FormField::Title,
            title: String::new(),
            kind: WidgetKind::Text,
            content: textarea(""),
            error: None,
        }
    }

    /// Form pre-filled from an existing widget
    pub fn edit(category_id: impl Into<String>, widget: &Widget) -> Self {
        Self {
            target: FormTarget::Edit {
                category_id: category_id.into(),
                widget_id: widget.id.clone(),
            },
            field: FormField::Title,
            title: widget.title.clone(),
            kind: widget.kind(),
            content: textarea(&content::to_editable_string(&widget.content)),
            error: None,
        }
    }

    /// Current content text
    pub fn content_str(&self) -> String {
        self.content.lines().join("\n")
    }

    /// Handle a key event, returning what the caller should do
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => return FormAction::Cancel,

            (KeyCode::Char('s'), KeyModifiers::CONTROL) => return FormAction::Submit,

            (KeyCode::Tab, _) => {
                self.field = self.field.next();
            }
            (KeyCode::BackTab, _) => {
                self.field = self.field.previous();
            }

            _ => match self.field {
                FormField::Title => match key.code {
                    KeyCode::Char(c) => self.title.push(c),
                    KeyCode::Backspace => {
                        self.title.pop();
                    }
                    KeyCode::Enter => return FormAction::Submit,
                    _ => {}
                },
                FormField::Kind => match key.code {
                    KeyCode::Left => self.cycle_kind(false),
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_kind(true),
                    KeyCode::Enter => return FormAction::Submit,
                    _ => {}
                },
                FormField::Content => {
                    self.content.input(key);
                }
            },
        }

        FormAction::None
    }

    /// Cycle the widget kind. New widgets get the example payload for the
    /// kind as a starting point; an edit keeps whatever content is typed.
    fn cycle_kind(&mut self, forward: bool) {
        let position = WidgetKind::ALL
            .iter()
            .position(|k| *k == self.kind)
            .unwrap_or(0);
        let len = WidgetKind::ALL.len();
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.kind = WidgetKind::ALL[next];

        if matches!(self.target, FormTarget::Add { .. }) {
            self.content = textarea(content::example_payload(self.kind));
        }
    }

    /// Render the form as a modal
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let title = match self.target {
            FormTarget::Add { .. } => " Add Widget ",
            FormTarget::Edit { .. } => " Edit Widget ",
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Green));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title field
                Constraint::Length(1), // Kind field
                Constraint::Min(3),    // Content textarea
                Constraint::Length(1), // Error / hints
            ])
            .split(inner);

        f.render_widget(
            field_line("Title", &self.title, self.field == FormField::Title),
            chunks[0],
        );

        let kind_value = format!("< {} >", self.kind);
        f.render_widget(
            field_line("Type", &kind_value, self.field == FormField::Kind),
            chunks[1],
        );

        let content_border = if self.field == FormField::Content {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let content_title = if self.kind == WidgetKind::Text {
            " Content "
        } else {
            " Chart Data (JSON) "
        };
        self.content.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(content_title)
                .border_style(Style::default().fg(content_border)),
        );
        if self.field == FormField::Content {
            self.content
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        } else {
            self.content.set_cursor_style(Style::default());
        }
        f.render_widget(&self.content, chunks[2]);

        let footer = match &self.error {
            Some(error) => Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "Tab: next field | Ctrl-s: save | Esc: cancel",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(footer), chunks[3]);
    }
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Green)));
    }
    Paragraph::new(Line::from(spans))
}

fn textarea(content: &str) -> TextArea<'static> {
    let mut textarea = TextArea::from(content.lines().map(|s| s.to_string()));
    textarea.set_placeholder_text("Enter widget content...");
    textarea
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashctl_core::WidgetContent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_cycles_fields() {
        let mut form = WidgetForm::add("1");
        assert_eq!(form.field, FormField::Title);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.field, FormField::Kind);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.field, FormField::Content);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.field, FormField::Title);
    }

    #[test]
    fn test_title_typing() {
        let mut form = WidgetForm::add("1");
        form.handle_key(key(KeyCode::Char('C')));
        form.handle_key(key(KeyCode::Char('P')));
        form.handle_key(key(KeyCode::Char('U')));
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.title, "CP");
    }

    #[test]
    fn test_kind_cycle_fills_example_payload_for_add() {
        let mut form = WidgetForm::add("1");
        form.handle_key(key(KeyCode::Tab)); // to Kind
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.kind, WidgetKind::Donut);
        assert!(form.content_str().contains("\"data\""));
    }

    #[test]
    fn test_kind_cycle_preserves_content_for_edit() {
        let widget = Widget::new("Note", WidgetContent::Text("keep me".into()));
        let mut form = WidgetForm::edit("1", &widget);
        form.handle_key(key(KeyCode::Tab)); // to Kind
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.content_str(), "keep me");
    }

    #[test]
    fn test_edit_prefills_chart_json() {
        let content =
            content::parse_content(WidgetKind::Donut, content::example_payload(WidgetKind::Donut))
                .unwrap();
        let widget = Widget::new("Accounts", content);
        let form = WidgetForm::edit("1", &widget);
        assert_eq!(form.kind, WidgetKind::Donut);
        assert!(form.content_str().contains("Connected"));
    }

    #[test]
    fn test_esc_cancels_and_ctrl_s_submits() {
        let mut form = WidgetForm::add("1");
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
        assert_eq!(
            form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            FormAction::Submit
        );
    }
}
