use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh id for a category or widget.
///
/// UUID v4 rather than a wall-clock string: two creations in the same
/// clock tick must not collide.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A named group of widgets. Identity is `id`; names need not be unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub widgets: Vec<Widget>,
}

impl Category {
    /// Create an empty category with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            widgets: Vec::new(),
        }
    }
}

/// Widget type discriminant, used by forms and rendering dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Text,
    Donut,
    Bar,
    Line,
    Progress,
}

impl WidgetKind {
    /// All kinds in form-selector order
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Text,
        WidgetKind::Donut,
        WidgetKind::Bar,
        WidgetKind::Line,
        WidgetKind::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Donut => "donut",
            WidgetKind::Bar => "bar",
            WidgetKind::Line => "line",
            WidgetKind::Progress => "progress",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One slice of a donut chart or one segment of a progress bar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceDatum {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// Content payload for donut and progress widgets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesContent {
    pub data: Vec<SliceDatum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// One label group in a bar chart (two bars per group)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub label: String,
    #[serde(default)]
    pub value1: f64,
    #[serde(default)]
    pub value2: f64,
    pub color1: String,
    pub color2: String,
}

/// Legend entry shared by bar charts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

/// Content payload for bar widgets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarContent {
    pub data: Vec<BarDatum>,
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
}

/// One series of a line chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub color: String,
}

/// Content payload for line widgets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineContent {
    pub labels: Vec<String>,
    pub datasets: Vec<LineSeries>,
}

/// Type-dependent widget content.
///
/// Serializes adjacently tagged so a widget lands on the wire as
/// `{"id": ..., "title": ..., "type": "donut", "content": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum WidgetContent {
    Text(String),
    Donut(SeriesContent),
    Bar(BarContent),
    Line(LineContent),
    Progress(SeriesContent),
}

impl WidgetContent {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetContent::Text(_) => WidgetKind::Text,
            WidgetContent::Donut(_) => WidgetKind::Donut,
            WidgetContent::Bar(_) => WidgetKind::Bar,
            WidgetContent::Line(_) => WidgetKind::Line,
            WidgetContent::Progress(_) => WidgetKind::Progress,
        }
    }
}

/// A single dashboard widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub content: WidgetContent,
}

impl Widget {
    /// Create a widget with a fresh id
    pub fn new(title: impl Into<String>, content: WidgetContent) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            content,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.content.kind()
    }
}

/// Title and content for a widget about to be inserted. The store assigns
/// the id, so drafts cannot smuggle one in.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetDraft {
    pub title: String,
    pub content: WidgetContent,
}

impl WidgetDraft {
    pub fn new(title: impl Into<String>, content: WidgetContent) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}
