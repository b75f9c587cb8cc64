/// Structured error types for dashctl-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// The TUI binary can still use `anyhow` for convenience, but library
/// consumers get structured, composable errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dashctl-core operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Referenced category id does not exist
    #[error("category not found: {id}")]
    CategoryNotFound { id: String },

    /// Referenced widget id does not exist within the category
    #[error("widget not found in category {category_id}: {widget_id}")]
    WidgetNotFound {
        category_id: String,
        widget_id: String,
    },

    /// Chart content failed to parse as JSON
    #[error("invalid {kind} content: {source}")]
    ContentParse {
        kind: String,
        source: serde_json::Error,
    },

    /// Chart content parsed but has the wrong shape
    #[error("invalid {kind} content: {reason}")]
    ContentShape { kind: String, reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// State file serialization or deserialization failed
    #[error("JSON error in {path:?}: {source}")]
    StateFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// State directory could not be determined
    #[error("could not determine home directory for state file")]
    NoHomeDir,
}

/// Result type alias for dashctl-core operations
pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    /// Create a category lookup error
    pub fn category_not_found(id: impl Into<String>) -> Self {
        Self::CategoryNotFound { id: id.into() }
    }

    /// Create a widget lookup error
    pub fn widget_not_found(
        category_id: impl Into<String>,
        widget_id: impl Into<String>,
    ) -> Self {
        Self::WidgetNotFound {
            category_id: category_id.into(),
            widget_id: widget_id.into(),
        }
    }

    /// Create a content parse error
    pub fn content_parse(kind: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ContentParse {
            kind: kind.into(),
            source,
        }
    }

    /// Create a content shape error
    pub fn content_shape(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ContentShape {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Create a state file error
    pub fn state_file(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::StateFile {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashError::category_not_found("abc");
        assert_eq!(err.to_string(), "category not found: abc");

        let err = DashError::widget_not_found("c1", "w9");
        assert!(err.to_string().contains("c1"));
        assert!(err.to_string().contains("w9"));

        let err = DashError::content_shape("donut", "data must be a non-empty array");
        assert_eq!(
            err.to_string(),
            "invalid donut content: data must be a non-empty array"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DashError = io_err.into();
        assert!(matches!(err, DashError::Io { .. }));
    }
}
