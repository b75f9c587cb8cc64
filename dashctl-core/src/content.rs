//! Form-boundary content handling.
//!
//! Chart payloads arrive as JSON text typed into the widget form. They are
//! parsed and shape-checked here, before any store call; a widget with
//! malformed content never reaches the store.

use crate::error::{DashError, Result};
use crate::model::{BarContent, LineContent, SeriesContent, WidgetContent, WidgetKind};

/// Parse raw form input into typed content for the selected widget kind.
///
/// Text widgets take the input verbatim. Chart widgets JSON-parse it and
/// validate the shape the renderer relies on.
pub fn parse_content(kind: WidgetKind, raw: &str) -> Result<WidgetContent> {
    match kind {
        WidgetKind::Text => Ok(WidgetContent::Text(raw.to_string())),
        WidgetKind::Donut => {
            let series: SeriesContent = parse_json(kind, raw)?;
            validate_series(kind, &series)?;
            Ok(WidgetContent::Donut(series))
        }
        WidgetKind::Progress => {
            let series: SeriesContent = parse_json(kind, raw)?;
            validate_series(kind, &series)?;
            Ok(WidgetContent::Progress(series))
        }
        WidgetKind::Bar => {
            let bar: BarContent = parse_json(kind, raw)?;
            if bar.data.is_empty() {
                return Err(DashError::content_shape(
                    kind.as_str(),
                    "data must be a non-empty array",
                ));
            }
            Ok(WidgetContent::Bar(bar))
        }
        WidgetKind::Line => {
            let line: LineContent = parse_json(kind, raw)?;
            if line.labels.is_empty() {
                return Err(DashError::content_shape(
                    kind.as_str(),
                    "labels must be a non-empty array",
                ));
            }
            // Empty datasets are allowed; the renderer shows an empty axis.
            Ok(WidgetContent::Line(line))
        }
    }
}

/// Render content back to the editable form representation: the raw string
/// for text widgets, pretty-printed JSON for charts.
pub fn to_editable_string(content: &WidgetContent) -> String {
    match content {
        WidgetContent::Text(text) => text.clone(),
        WidgetContent::Donut(series) | WidgetContent::Progress(series) => pretty(series),
        WidgetContent::Bar(bar) => pretty(bar),
        WidgetContent::Line(line) => pretty(line),
    }
}

/// Starter payload shown when the form switches to a chart kind
pub fn example_payload(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Text => "",
        WidgetKind::Donut | WidgetKind::Progress => {
            r#"{
  "data": [
    { "label": "Connected", "value": 2, "color": "blue" },
    { "label": "Not Connected", "value": 2, "color": "yellow" }
  ],
  "total": 4
}"#
        }
        WidgetKind::Bar => {
            r#"{
  "data": [
    { "label": "Jan", "value1": 40, "value2": 30, "color1": "blue", "color2": "green" },
    { "label": "Feb", "value1": 55, "value2": 25, "color1": "blue", "color2": "green" }
  ],
  "legend": [
    { "label": "Current Year", "color": "blue" },
    { "label": "Previous Year", "color": "green" }
  ]
}"#
        }
        WidgetKind::Line => {
            r#"{
  "labels": ["Jan", "Feb", "Mar"],
  "datasets": [
    { "label": "Critical", "data": [12, 19, 15], "color": "red" }
  ]
}"#
        }
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(kind: WidgetKind, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| DashError::content_parse(kind.as_str(), e))
}

fn validate_series(kind: WidgetKind, series: &SeriesContent) -> Result<()> {
    if series.data.is_empty() {
        return Err(DashError::content_shape(
            kind.as_str(),
            "data must be a non-empty array",
        ));
    }
    Ok(())
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    // Content was built from valid JSON; serialization cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passthrough() {
        let content = parse_content(WidgetKind::Text, "plain note").unwrap();
        assert_eq!(content, WidgetContent::Text("plain note".into()));
    }

    #[test]
    fn test_donut_parse_ok() {
        let content = parse_content(WidgetKind::Donut, example_payload(WidgetKind::Donut)).unwrap();
        match content {
            WidgetContent::Donut(series) => {
                assert_eq!(series.data.len(), 2);
                assert_eq!(series.total, Some(4.0));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_content(WidgetKind::Donut, "{not json").unwrap_err();
        assert!(matches!(err, crate::DashError::ContentParse { .. }));
    }

    #[test]
    fn test_empty_data_rejected() {
        let err = parse_content(WidgetKind::Donut, r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, crate::DashError::ContentShape { .. }));

        let err = parse_content(WidgetKind::Progress, r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, crate::DashError::ContentShape { .. }));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        // Valid JSON, but not the donut shape
        let err = parse_content(WidgetKind::Donut, r#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(err, crate::DashError::ContentParse { .. }));
    }

    #[test]
    fn test_line_allows_empty_datasets() {
        let content =
            parse_content(WidgetKind::Line, r#"{"labels": ["Jan"], "datasets": []}"#).unwrap();
        match content {
            WidgetContent::Line(line) => assert!(line.datasets.is_empty()),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_line_requires_labels() {
        let err = parse_content(WidgetKind::Line, r#"{"labels": [], "datasets": []}"#).unwrap_err();
        assert!(matches!(err, crate::DashError::ContentShape { .. }));
    }

    #[test]
    fn test_editable_string_roundtrip() {
        let content = parse_content(WidgetKind::Bar, example_payload(WidgetKind::Bar)).unwrap();
        let edited = to_editable_string(&content);
        let reparsed = parse_content(WidgetKind::Bar, &edited).unwrap();
        assert_eq!(content, reparsed);
    }

    #[test]
    fn test_editable_string_for_text_is_verbatim() {
        let content = WidgetContent::Text("hello".into());
        assert_eq!(to_editable_string(&content), "hello");
    }
}
