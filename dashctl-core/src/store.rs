//! The widget store: an explicit state value plus its mutation operations.
//!
//! No ambient singleton; the owner (the TUI, a test) holds a [`Dashboard`]
//! and persists it after each successful mutation. Every operation on a
//! missing id returns a typed error and leaves the state untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashError, Result};
use crate::model::{generate_id, Category, Widget, WidgetDraft};

/// Full store state: ordered categories plus the transient search term.
///
/// This struct is also the persisted wire layout
/// (`{"categories": [...], "searchTerm": "..."}`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub search_term: String,
}

impl Dashboard {
    /// Empty dashboard, no categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new category with a fresh id and no widgets. Always
    /// succeeds; name validation (non-empty) is the caller's job.
    pub fn add_category(&mut self, name: impl Into<String>) -> String {
        let category = Category::new(name);
        let id = category.id.clone();
        debug!(category = %id, name = %category.name, "add category");
        self.categories.push(category);
        id
    }

    /// Drop the category with the given id
    pub fn remove_category(&mut self, id: &str) -> Result<()> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DashError::category_not_found(id))?;
        debug!(category = %id, "remove category");
        self.categories.remove(index);
        Ok(())
    }

    /// Append a widget to a category. The store assigns the id; the new
    /// widget's id is returned.
    pub fn add_widget(&mut self, category_id: &str, draft: WidgetDraft) -> Result<String> {
        let category = self.category_mut(category_id)?;
        let widget = Widget::new(draft.title, draft.content);
        let id = widget.id.clone();
        debug!(category = %category_id, widget = %id, "add widget");
        category.widgets.push(widget);
        Ok(id)
    }

    /// Replace the widget with `widget.id` in place. The caller is
    /// responsible for having parsed and validated `widget.content`.
    pub fn update_widget(&mut self, category_id: &str, widget: Widget) -> Result<()> {
        let category = self.category_mut(category_id)?;
        let index = category
            .widgets
            .iter()
            .position(|w| w.id == widget.id)
            .ok_or_else(|| DashError::widget_not_found(category_id, &widget.id))?;
        debug!(category = %category_id, widget = %widget.id, "update widget");
        category.widgets[index] = widget;
        Ok(())
    }

    /// Remove a widget from a category
    pub fn remove_widget(&mut self, category_id: &str, widget_id: &str) -> Result<()> {
        let category = self.category_mut(category_id)?;
        let index = category
            .widgets
            .iter()
            .position(|w| w.id == widget_id)
            .ok_or_else(|| DashError::widget_not_found(category_id, widget_id))?;
        debug!(category = %category_id, widget = %widget_id, "remove widget");
        category.widgets.remove(index);
        Ok(())
    }

    /// Move a widget between categories: remove + reinsert under a fresh
    /// id, so a widget never belongs to two categories at once. Returns
    /// the widget's id after the move. Moving within the same category is
    /// a no-op.
    pub fn move_widget(
        &mut self,
        from_category: &str,
        widget_id: &str,
        to_category: &str,
    ) -> Result<String> {
        if from_category == to_category {
            return Ok(widget_id.to_string());
        }

        // Check the destination before touching the source, so a bad
        // target id cannot drop the widget.
        if !self.categories.iter().any(|c| c.id == to_category) {
            return Err(DashError::category_not_found(to_category));
        }

        let source = self.category_mut(from_category)?;
        let index = source
            .widgets
            .iter()
            .position(|w| w.id == widget_id)
            .ok_or_else(|| DashError::widget_not_found(from_category, widget_id))?;
        let mut widget = source.widgets.remove(index);
        widget.id = generate_id();
        let new_id = widget.id.clone();

        debug!(
            from = %from_category,
            to = %to_category,
            widget = %new_id,
            "move widget"
        );

        let target = self.category_mut(to_category)?;
        target.widgets.push(widget);
        Ok(new_id)
    }

    /// Replace the transient search string. Unrelated to persistence.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Categories whose name or any contained widget title contains the
    /// current search term, case-insensitively. A category matching by
    /// name is returned in full, all widgets included.
    pub fn filtered_categories(&self) -> Vec<&Category> {
        let needle = self.search_term.to_lowercase();
        self.categories
            .iter()
            .filter(|category| {
                category.name.to_lowercase().contains(&needle)
                    || category
                        .widgets
                        .iter()
                        .any(|w| w.title.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Look up a category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a widget by id within a category
    pub fn widget(&self, category_id: &str, widget_id: &str) -> Option<&Widget> {
        self.category(category_id)?
            .widgets
            .iter()
            .find(|w| w.id == widget_id)
    }

    fn category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DashError::category_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidgetContent;

    fn draft(title: &str, content: &str) -> WidgetDraft {
        WidgetDraft::new(title, WidgetContent::Text(content.into()))
    }

    /// One category "Ops" holding a single text widget "CPU".
    fn ops_dashboard() -> Dashboard {
        Dashboard {
            categories: vec![Category {
                id: "1".into(),
                name: "Ops".into(),
                widgets: vec![Widget {
                    id: "1".into(),
                    title: "CPU".into(),
                    content: WidgetContent::Text("idle".into()),
                }],
            }],
            search_term: String::new(),
        }
    }

    #[test]
    fn test_added_widget_appears_exactly_once() {
        let mut dash = Dashboard::new();
        let cat = dash.add_category("Ops");
        let widget_id = dash.add_widget(&cat, draft("CPU", "idle")).unwrap();

        let filtered = dash.filtered_categories();
        assert_eq!(filtered.len(), 1);
        let count = filtered[0]
            .widgets
            .iter()
            .filter(|w| w.id == widget_id)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_add_widget_assigns_fresh_id() {
        let mut dash = ops_dashboard();
        let id = dash
            .add_widget("1", draft("Mem", "ok"))
            .expect("category exists");

        let category = dash.category("1").unwrap();
        assert_eq!(category.widgets.len(), 2);
        assert!(!id.is_empty());
        assert_ne!(id, "1");
        assert_eq!(category.widgets[1].id, id);
    }

    #[test]
    fn test_add_widget_missing_category() {
        let mut dash = ops_dashboard();
        let before = dash.clone();
        let err = dash.add_widget("404", draft("Mem", "ok")).unwrap_err();
        assert!(matches!(err, DashError::CategoryNotFound { .. }));
        assert_eq!(dash, before);
    }

    #[test]
    fn test_remove_widget_second_call_is_noop_on_state() {
        let mut dash = ops_dashboard();
        dash.remove_widget("1", "1").unwrap();
        let after_first = dash.clone();

        let err = dash.remove_widget("1", "1").unwrap_err();
        assert!(matches!(err, DashError::WidgetNotFound { .. }));
        assert_eq!(dash, after_first);
    }

    #[test]
    fn test_update_widget_replaces_content_exactly() {
        let mut dash = ops_dashboard();
        dash.update_widget(
            "1",
            Widget {
                id: "1".into(),
                title: "CPU".into(),
                content: WidgetContent::Text("busy".into()),
            },
        )
        .unwrap();

        let widget = dash.widget("1", "1").unwrap();
        assert_eq!(widget.content, WidgetContent::Text("busy".into()));
    }

    #[test]
    fn test_update_widget_unknown_id_leaves_state_unchanged() {
        let mut dash = ops_dashboard();
        let before = dash.clone();

        let err = dash
            .update_widget(
                "1",
                Widget {
                    id: "404".into(),
                    title: "CPU".into(),
                    content: WidgetContent::Text("busy".into()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, DashError::WidgetNotFound { .. }));
        assert_eq!(dash, before);
    }

    #[test]
    fn test_remove_category_missing() {
        let mut dash = ops_dashboard();
        let before = dash.clone();
        let err = dash.remove_category("404").unwrap_err();
        assert!(matches!(err, DashError::CategoryNotFound { .. }));
        assert_eq!(dash, before);
    }

    #[test]
    fn test_same_name_twice_distinct_categories() {
        let mut dash = Dashboard::new();
        let a = dash.add_category("Metrics");
        let b = dash.add_category("Metrics");
        assert_ne!(a, b);
        assert_eq!(dash.categories.len(), 2);
    }

    #[test]
    fn test_search_scenario_cpu_then_gpu() {
        let mut dash = ops_dashboard();

        dash.set_search_term("cpu");
        let filtered = dash.filtered_categories();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Ops");
        assert_eq!(filtered[0].widgets.len(), 1);

        dash.set_search_term("gpu");
        assert!(dash.filtered_categories().is_empty());
    }

    #[test]
    fn test_filter_case_insensitive_on_names_and_titles() {
        let mut dash = Dashboard::new();
        let a = dash.add_category("Production");
        dash.add_widget(&a, draft("Latency P99", "")).unwrap();
        let b = dash.add_category("Staging");
        dash.add_widget(&b, draft("Error Rate", "")).unwrap();

        // Category name match, different case
        dash.set_search_term("PROD");
        let filtered = dash.filtered_categories();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Production");

        // Widget title match pulls in its whole category
        dash.set_search_term("error");
        let filtered = dash.filtered_categories();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Staging");
    }

    #[test]
    fn test_name_match_includes_all_widgets() {
        let mut dash = Dashboard::new();
        let cat = dash.add_category("Ops");
        dash.add_widget(&cat, draft("CPU", "")).unwrap();
        dash.add_widget(&cat, draft("Memory", "")).unwrap();

        // "ops" matches only the category name; both widgets still shown
        dash.set_search_term("ops");
        let filtered = dash.filtered_categories();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].widgets.len(), 2);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let mut dash = Dashboard::new();
        dash.add_category("A");
        dash.add_category("B");
        assert_eq!(dash.filtered_categories().len(), 2);
    }

    #[test]
    fn test_move_widget_reassigns_id() {
        let mut dash = ops_dashboard();
        let other = dash.add_category("Archive");

        let new_id = dash.move_widget("1", "1", &other).unwrap();
        assert_ne!(new_id, "1");
        assert!(dash.category("1").unwrap().widgets.is_empty());

        let moved = dash.widget(&other, &new_id).unwrap();
        assert_eq!(moved.title, "CPU");
    }

    #[test]
    fn test_move_widget_same_category_is_noop() {
        let mut dash = ops_dashboard();
        let before = dash.clone();
        let id = dash.move_widget("1", "1", "1").unwrap();
        assert_eq!(id, "1");
        assert_eq!(dash, before);
    }

    #[test]
    fn test_move_widget_bad_target_keeps_source_intact() {
        let mut dash = ops_dashboard();
        let before = dash.clone();
        let err = dash.move_widget("1", "1", "404").unwrap_err();
        assert!(matches!(err, DashError::CategoryNotFound { .. }));
        assert_eq!(dash, before);
    }
}
