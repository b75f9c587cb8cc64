pub mod app;
pub mod form;
pub mod mode;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use form::{FormAction, FormField, FormTarget, WidgetForm};
pub use mode::{AppMode, Pane};
