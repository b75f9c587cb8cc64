pub mod content;
pub mod error;
pub mod model;
pub mod persist;
pub mod seed;
pub mod store;

pub use content::{example_payload, parse_content, to_editable_string};
pub use error::{DashError, Result};
pub use model::{
    BarContent, BarDatum, Category, LegendEntry, LineContent, LineSeries, SeriesContent,
    SliceDatum, Widget, WidgetContent, WidgetDraft, WidgetKind,
};
pub use persist::StateFile;
pub use seed::default_dashboard;
pub use store::Dashboard;
