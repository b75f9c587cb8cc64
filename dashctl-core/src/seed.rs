//! The hardcoded default dataset, used whenever no valid state file
//! exists. Mirrors the CNAPP sample dashboard the editor ships with.

use crate::model::{
    BarContent, BarDatum, Category, LegendEntry, LineContent, LineSeries, SeriesContent,
    SliceDatum, Widget, WidgetContent,
};
use crate::store::Dashboard;

fn slice(label: &str, value: f64, color: &str) -> SliceDatum {
    SliceDatum {
        label: label.into(),
        value,
        color: color.into(),
    }
}

fn bar(label: &str, value1: f64, value2: f64) -> BarDatum {
    BarDatum {
        label: label.into(),
        value1,
        value2,
        color1: "blue".into(),
        color2: "green".into(),
    }
}

fn series(label: &str, data: &[f64], color: &str) -> LineSeries {
    LineSeries {
        label: label.into(),
        data: data.to_vec(),
        color: color.into(),
    }
}

/// Build the default dashboard
pub fn default_dashboard() -> Dashboard {
    Dashboard {
        categories: vec![
            Category {
                id: "1".into(),
                name: "CSPM Executive Dashboard".into(),
                widgets: vec![
                    Widget {
                        id: "1".into(),
                        title: "Cloud Accounts".into(),
                        content: WidgetContent::Donut(SeriesContent {
                            data: vec![
                                slice("Connected", 2.0, "blue"),
                                slice("Not Connected", 2.0, "yellow"),
                            ],
                            total: Some(4.0),
                        }),
                    },
                    Widget {
                        id: "2".into(),
                        title: "Cloud Account Risk Assessment".into(),
                        content: WidgetContent::Donut(SeriesContent {
                            data: vec![
                                slice("Failed", 1683.0, "red"),
                                slice("Warning", 681.0, "yellow"),
                                slice("Passed", 7254.0, "green"),
                                slice("Not Available", 35.0, "gray"),
                            ],
                            total: Some(9659.0),
                        }),
                    },
                    Widget {
                        id: "3".into(),
                        title: "Monthly Comparison".into(),
                        content: WidgetContent::Bar(BarContent {
                            data: vec![
                                bar("January", 40.0, 30.0),
                                bar("February", 55.0, 25.0),
                                bar("March", 32.0, 40.0),
                                bar("April", 70.0, 60.0),
                                bar("May", 52.0, 45.0),
                            ],
                            legend: vec![
                                LegendEntry {
                                    label: "Current Year".into(),
                                    color: "blue".into(),
                                },
                                LegendEntry {
                                    label: "Previous Year".into(),
                                    color: "green".into(),
                                },
                            ],
                        }),
                    },
                    Widget {
                        id: "4".into(),
                        title: "Security Incidents Over Time".into(),
                        content: WidgetContent::Line(LineContent {
                            labels: ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
                                .iter()
                                .map(|s| s.to_string())
                                .collect(),
                            datasets: vec![
                                series("Critical", &[12.0, 19.0, 15.0, 8.0, 22.0, 14.0], "red"),
                                series("High", &[35.0, 42.0, 38.0, 31.0, 45.0, 37.0], "yellow"),
                                series("Medium", &[85.0, 92.0, 78.0, 71.0, 95.0, 87.0], "blue"),
                            ],
                        }),
                    },
                ],
            },
            Category {
                id: "2".into(),
                name: "CWPP Dashboard".into(),
                widgets: vec![
                    Widget {
                        id: "5".into(),
                        title: "Top 5 Namespace Specific Alerts".into(),
                        content: WidgetContent::Line(LineContent {
                            labels: ["Jan", "Feb", "Mar", "Apr", "May"]
                                .iter()
                                .map(|s| s.to_string())
                                .collect(),
                            datasets: vec![],
                        }),
                    },
                    Widget {
                        id: "6".into(),
                        title: "Workload Alerts".into(),
                        content: WidgetContent::Line(LineContent {
                            labels: ["Jan", "Feb", "Mar", "Apr", "May"]
                                .iter()
                                .map(|s| s.to_string())
                                .collect(),
                            datasets: vec![],
                        }),
                    },
                ],
            },
            Category {
                id: "3".into(),
                name: "Registry Scan".into(),
                widgets: vec![
                    Widget {
                        id: "7".into(),
                        title: "Image Risk Assessment".into(),
                        content: WidgetContent::Progress(SeriesContent {
                            data: vec![
                                slice("Critical", 5.0, "red"),
                                slice("High", 150.0, "#ff7043"),
                            ],
                            total: Some(1470.0),
                        }),
                    },
                    Widget {
                        id: "8".into(),
                        title: "Image Security Issues".into(),
                        content: WidgetContent::Progress(SeriesContent {
                            data: vec![
                                slice("Critical", 2.0, "red"),
                                slice("High", 2.0, "#ff7043"),
                            ],
                            total: Some(2.0),
                        }),
                    },
                ],
            },
        ],
        search_term: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidgetKind;

    #[test]
    fn test_seed_shape() {
        let dash = default_dashboard();
        assert_eq!(dash.categories.len(), 3);
        assert!(dash.search_term.is_empty());

        let kinds: Vec<WidgetKind> = dash.categories[0]
            .widgets
            .iter()
            .map(|w| w.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                WidgetKind::Donut,
                WidgetKind::Donut,
                WidgetKind::Bar,
                WidgetKind::Line
            ]
        );
    }

    #[test]
    fn test_seed_ids_unique() {
        let dash = default_dashboard();
        let mut ids: Vec<&str> = dash
            .categories
            .iter()
            .flat_map(|c| c.widgets.iter().map(|w| w.id.as_str()))
            .collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_seed_survives_wire_roundtrip() {
        let dash = default_dashboard();
        let json = serde_json::to_string(&dash).unwrap();
        let back: Dashboard = serde_json::from_str(&json).unwrap();
        assert_eq!(dash, back);
    }
}
